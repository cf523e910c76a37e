//! Parsing of Twilio webhook payloads and signup requests.

use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::command::DEFAULT_TONE;
use crate::prompt::KNOWN_TONES;

/// Fields Twilio posts to the SMS webhook; only the ones the service reads.
#[derive(Debug, Deserialize, Serialize)]
pub struct SmsWebhookEvent {
    pub message_sid: String,
    pub account_sid: String,
    pub from: String,
    pub to: String,
    pub body: String,
}

static E164_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").expect("static regex compile"));

/// E.164 check for signup input: leading `+`, country code, 2-15 digits.
pub fn is_valid_phone(phone: &str) -> bool {
    E164_RE.is_match(phone)
}

/// Decodes a URL-encoded form component ('+' means space).
///
/// # Arguments
/// * `input` - The URL-encoded string to decode
///
/// # Returns
/// * `Ok(String)` - The decoded string if successful
/// * `Err(String)` - An error message if decoding fails
///
/// # Examples
///
/// ```
/// use kochi::api::parsing::decode_url_component;
///
/// let decoded = decode_url_component("hello%20world").unwrap();
/// assert_eq!(decoded, "hello world");
///
/// let decoded_plus = decode_url_component("hello+world").unwrap();
/// assert_eq!(decoded_plus, "hello world");
/// ```
pub fn decode_url_component(input: &str) -> Result<String, String> {
    percent_decode_str(input)
        .decode_utf8()
        .map(|s| s.replace('+', " "))
        .map_err(|e| format!("Failed to decode URL component: {}", e))
}

/// Parse a form-encoded body into sorted key/value pairs.
///
/// The ordered map matters: Twilio signs the request over the parameter
/// names and values sorted by name, so signature verification reuses this
/// exact structure.
///
/// # Errors
/// Returns an error message when a key or value cannot be decoded.
pub fn parse_form_params(form_data: &str) -> Result<BTreeMap<String, String>, String> {
    let mut map: BTreeMap<String, String> = BTreeMap::new();

    for pair in form_data.split('&') {
        if let Some(idx) = pair.find('=') {
            let key = decode_url_component(&pair[..idx])
                .map_err(|e| format!("Failed to decode key: {}", e))?;

            let value = decode_url_component(&pair[idx + 1..])
                .map_err(|e| format!("Failed to decode value: {}", e))?;

            map.insert(key, value);
        }
    }

    Ok(map)
}

/// Build an [`SmsWebhookEvent`] from decoded form parameters. Missing fields
/// default to empty strings; Twilio controls the payload, not the user.
pub fn parse_webhook_event(params: &BTreeMap<String, String>) -> SmsWebhookEvent {
    SmsWebhookEvent {
        message_sid: params.get("MessageSid").cloned().unwrap_or_default(),
        account_sid: params.get("AccountSid").cloned().unwrap_or_default(),
        from: params.get("From").cloned().unwrap_or_default(),
        to: params.get("To").cloned().unwrap_or_default(),
        body: params.get("Body").cloned().unwrap_or_default(),
    }
}

/// A validated web generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub topic: String,
    pub tone: String,
    /// Delivery phone for the finished link; `None` means web-only.
    pub phone: Option<String>,
}

/// Parse and validate the JSON body of a `POST /api/generate` request.
///
/// Unlike the SMS path, the web caller sees the response synchronously, so
/// validation is eager: an unknown tone is rejected instead of silently
/// mapping to neutral.
///
/// # Errors
/// Returns a user-facing message when the body is not JSON, the topic is
/// missing or empty, the tone is unsupported, or the phone is not E.164.
pub fn parse_generate_request(body: &str) -> Result<GenerateRequest, String> {
    let json: Value =
        serde_json::from_str(body).map_err(|_| "Invalid JSON body".to_string())?;

    let topic = json
        .get("topic")
        .and_then(|t| t.as_str())
        .map(str::trim)
        .unwrap_or("");
    if topic.is_empty() {
        return Err("Topic is required".to_string());
    }

    let tone = json
        .get("tone")
        .and_then(|t| t.as_str())
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TONE.to_string());
    if !KNOWN_TONES.contains(&tone.as_str()) {
        return Err(format!(
            "Unknown tone \"{tone}\". Supported tones: {}",
            KNOWN_TONES.join(", ")
        ));
    }

    let phone = match json
        .get("phone")
        .and_then(|p| p.as_str())
        .map(str::trim)
        .filter(|p| !p.is_empty())
    {
        Some(p) if is_valid_phone(p) => Some(p.to_string()),
        Some(_) => {
            return Err(
                "Invalid phone number format. Include country code (e.g., +1234567890)"
                    .to_string(),
            );
        }
        None => None,
    };

    Ok(GenerateRequest {
        topic: topic.to_string(),
        tone,
        phone,
    })
}

/// Case-insensitive header lookup in a Lambda proxy event's `headers` value.
pub fn get_header_value<'a>(headers: &'a serde_json::Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}
