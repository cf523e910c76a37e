//! Enqueues generation tasks onto the processing queue.

use aws_sdk_sqs::Client as SqsClient;
use tracing::info;

use crate::core::{config::AppConfig, models::GenerationTask};
use crate::errors::NewsletterError;

/// Serialize a task and enqueue it, returning the SQS message id.
///
/// # Errors
///
/// Returns an error if serialization fails or the message cannot be sent to
/// the processing queue.
pub async fn enqueue_task(
    config: &AppConfig,
    task: &GenerationTask,
) -> Result<String, NewsletterError> {
    let shared_config = aws_config::from_env().load().await;
    let client = SqsClient::new(&shared_config);
    let message_body = serde_json::to_string(task)
        .map_err(|e| NewsletterError::GeneralError(format!("Failed to serialize task: {e}")))?;

    let output = client
        .send_message()
        .queue_url(&config.processing_queue_url)
        .message_body(message_body)
        .send()
        .await
        .map_err(|e| NewsletterError::AwsError(format!("Failed to send message to SQS: {e}")))?;

    let message_id = output.message_id().unwrap_or("unknown").to_string();
    info!(
        "Enqueued task {} as SQS message {}",
        task.correlation_id, message_id
    );
    Ok(message_id)
}
