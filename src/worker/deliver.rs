//! Delivery of generation results back to the requester over SMS.

use tracing::error;

use crate::core::{config::AppConfig, models::GenerationTask};
use crate::errors::NewsletterError;
use crate::sms::TwilioClient;

/// Text the requester the link to their published newsletter.
///
/// # Errors
///
/// Returns an error when the SMS cannot be sent.
pub async fn deliver_newsletter_ready(
    config: &AppConfig,
    task: &GenerationTask,
    url: &str,
) -> Result<(), NewsletterError> {
    TwilioClient::new(config)
        .send_newsletter_ready(&task.from, &task.topic, url)
        .await
}

/// Report a failure to the requester. Best-effort: failure to deliver the
/// failure notice is only logged.
pub async fn deliver_error(config: &AppConfig, task: &GenerationTask, message: &str) {
    if let Err(e) = TwilioClient::new(config)
        .send_error(&task.from, message)
        .await
    {
        error!("Failed to send error SMS to {}: {}", task.from, e);
    }
}
