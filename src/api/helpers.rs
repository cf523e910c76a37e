//! Common helper functions for API handlers.
//!
//! Response builders produce the Lambda proxy `{statusCode, headers, body}`
//! shape, plus a fire-and-forget SMS helper that keeps webhook acks fast.

use serde_json::{Value, json};
use std::time::Duration;
use tracing::error;

use crate::core::config::AppConfig;
use crate::sms::TwilioClient;

/// Returns a 200 OK response with a plain-text body.
#[must_use]
pub fn ok_text(text: &str) -> Value {
    json!({
        "statusCode": 200,
        "headers": { "Content-Type": "text/plain" },
        "body": text
    })
}

/// Returns a 200 OK response with a JSON body.
#[must_use]
pub fn ok_json(body: &Value) -> Value {
    json!({
        "statusCode": 200,
        "headers": { "Content-Type": "application/json" },
        "body": body.to_string()
    })
}

/// Returns a 200 OK response with an HTML page body.
#[must_use]
pub fn html_response(html: &str) -> Value {
    json!({
        "statusCode": 200,
        "headers": { "Content-Type": "text/html; charset=utf-8" },
        "body": html
    })
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json!({
        "statusCode": status_code,
        "body": json!({ "error": message }).to_string()
    })
}

/// Sends an SMS without holding up the HTTP ack.
///
/// Spawns the send and waits at most `timeout_ms` for it to complete; if the
/// timeout fires, the send continues in the background.
pub async fn send_sms_with_timeout(config: &AppConfig, to: &str, message: &str, timeout_ms: u64) {
    let config_clone = config.clone();
    let to = to.to_string();
    let message = message.to_string();

    let handle = tokio::spawn(async move {
        let client = TwilioClient::new(&config_clone);
        if let Err(e) = client.send(&to, &message).await {
            error!("Failed to send SMS to {}: {}", to, e);
        }
    });

    let _ = tokio::time::timeout(Duration::from_millis(timeout_ms), handle).await;
}
