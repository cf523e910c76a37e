//! Twilio SMS delivery.
//!
//! When Twilio credentials are not configured the client runs disabled and
//! only logs what it would send, which keeps local development working
//! without an account.

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

use crate::core::config::AppConfig;
use crate::errors::NewsletterError;

const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Welcome text sent after signup or on first contact.
pub const WELCOME_MESSAGE: &str = "Welcome to Kochi Newsletter!\n\n\
To generate a newsletter, text:\n\
newsletter: topic = your topic\n\n\
Examples:\n\
- newsletter: topic = AI, tone = casual\n\
- newsletter: topic = climate change\n\n\
You'll receive a shareable link to your newsletter!";

/// Hint sent when a message is not a recognized command.
pub const USAGE_HINT: &str = "Send \"newsletter: topic = your topic\" to generate a newsletter!\n\n\
Example: newsletter: topic = AI, tone = casual";

struct TwilioCredentials {
    account_sid: String,
    auth_token: String,
    from_number: String,
}

/// Twilio Messages API client.
pub struct TwilioClient {
    credentials: Option<TwilioCredentials>,
}

impl TwilioClient {
    pub fn new(config: &AppConfig) -> Self {
        let credentials = match (
            &config.twilio_account_sid,
            &config.twilio_auth_token,
            &config.twilio_from_number,
        ) {
            (Some(sid), Some(token), Some(from)) => Some(TwilioCredentials {
                account_sid: sid.clone(),
                auth_token: token.clone(),
                from_number: from.clone(),
            }),
            _ => {
                warn!("Twilio credentials not provided, SMS sending disabled");
                None
            }
        };
        Self { credentials }
    }

    /// Send one SMS. In disabled mode this logs and reports success.
    ///
    /// # Errors
    ///
    /// Returns an error when the Twilio request fails or Twilio rejects the
    /// message.
    pub async fn send(&self, to: &str, message: &str) -> Result<(), NewsletterError> {
        let Some(creds) = &self.credentials else {
            info!("SMS disabled, would send to {}: {}", to, message);
            return Ok(());
        };

        let url = format!(
            "{TWILIO_API_BASE}/Accounts/{}/Messages.json",
            creds.account_sid
        );
        let params = [
            ("To", to),
            ("From", creds.from_number.as_str()),
            ("Body", message),
        ];

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        let response = client
            .post(&url)
            .basic_auth(&creds.account_sid, Some(&creds.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| NewsletterError::HttpError(format!("Twilio request failed: {}", e)))?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            let code = body.get("code").and_then(|c| c.as_u64());
            return Err(NewsletterError::SmsError(map_twilio_error(code, &body)));
        }

        info!(
            "SMS sent - SID: {}, Status: {}, To: {}",
            body.get("sid").and_then(|s| s.as_str()).unwrap_or("N/A"),
            body.get("status").and_then(|s| s.as_str()).unwrap_or("N/A"),
            to
        );
        Ok(())
    }

    /// Text the requester the link to their finished newsletter.
    pub async fn send_newsletter_ready(
        &self,
        to: &str,
        topic: &str,
        url: &str,
    ) -> Result<(), NewsletterError> {
        self.send(to, &format!("Your newsletter on \"{topic}\" is ready: {url}"))
            .await
    }

    /// Text the requester an error message.
    pub async fn send_error(&self, to: &str, error_message: &str) -> Result<(), NewsletterError> {
        self.send(to, &format!("Error: {error_message}")).await
    }
}

/// Map Twilio error codes seen in practice to friendlier messages.
fn map_twilio_error(code: Option<u64>, body: &Value) -> String {
    match code {
        Some(21211) => "Invalid phone number format".to_string(),
        Some(21608) => "Phone number not verified (Trial account restriction)".to_string(),
        Some(21408) => "Permission denied - check Twilio account permissions".to_string(),
        _ => {
            let message = body
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error");
            format!("Twilio error: {}", message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_twilio_error_codes() {
        assert_eq!(
            map_twilio_error(Some(21211), &Value::Null),
            "Invalid phone number format"
        );
        assert_eq!(
            map_twilio_error(Some(21608), &Value::Null),
            "Phone number not verified (Trial account restriction)"
        );
    }

    #[test]
    fn unknown_codes_fall_back_to_twilio_message() {
        let body = serde_json::json!({ "code": 99999, "message": "boom" });
        assert_eq!(map_twilio_error(Some(99999), &body), "Twilio error: boom");
        assert_eq!(
            map_twilio_error(None, &Value::Null),
            "Twilio error: Unknown error"
        );
    }
}
