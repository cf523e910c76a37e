//! Twilio request signature verification.
//!
//! Twilio signs each webhook by concatenating the full request URL with
//! every POST parameter name and value sorted by name, computing an
//! HMAC-SHA1 over the result with the account auth token, and base64
//! encoding it into the `X-Twilio-Signature` header.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::collections::BTreeMap;
use tracing::error;

pub fn compute_signature(
    auth_token: &str,
    url: &str,
    params: &BTreeMap<String, String>,
) -> String {
    let mut base_string = url.to_string();
    for (key, value) in params {
        base_string.push_str(key);
        base_string.push_str(value);
    }

    let mut mac = match Hmac::<Sha1>::new_from_slice(auth_token.as_bytes()) {
        Ok(mac) => mac,
        Err(e) => {
            error!("Failed to create HMAC: {}", e);
            return String::new();
        }
    };
    mac.update(base_string.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

pub fn verify_twilio_signature(
    auth_token: &str,
    url: &str,
    params: &BTreeMap<String, String>,
    signature: &str,
) -> bool {
    let computed = compute_signature(auth_token, url, params);

    if computed == signature {
        true
    } else {
        error!(
            "Signature verification failed. Computed: '{}', Received: '{}'",
            computed, signature
        );
        false
    }
}
