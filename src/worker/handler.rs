use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use super::{deliver, generate};
use crate::core::{config::AppConfig, models::GenerationTask};

/// Lambda handler for the Worker entrypoint. Parses the SQS message, runs
/// the generation pipeline, and reports the result over SMS.
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<(), Error> {
    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    info!(
        "Worker Lambda received SQS event payload: {:?}",
        event.payload
    );

    let task: GenerationTask = event
        .payload
        .get("Records")
        .and_then(|records| records.as_array())
        .and_then(|records| records.first())
        .and_then(|record| record.get("body"))
        .and_then(|body| body.as_str())
        .ok_or_else(|| Error::from("Failed to extract SQS message body"))
        .and_then(|body_str| {
            serde_json::from_str(body_str).map_err(|e| {
                Error::from(format!(
                    "Failed to parse SQS message body into GenerationTask: {}",
                    e
                ))
            })
        })?;

    info!("Successfully parsed GenerationTask: {:?}", task);

    match generate::process_task(&config, &task).await {
        Ok(stored) => {
            // Web requests without a delivery phone end here.
            if task.from.is_empty() {
                info!(
                    "Task {} has no delivery phone; newsletter available at {}",
                    task.correlation_id, stored.url
                );
            } else if let Err(e) =
                deliver::deliver_newsletter_ready(&config, &task, &stored.url).await
            {
                error!("Failed to deliver newsletter link: {}", e);
                deliver::deliver_error(
                    &config,
                    &task,
                    "Your newsletter was generated but the link could not be sent. Please try again.",
                )
                .await;
            }
        }
        Err(e) => {
            error!("Failed to generate newsletter: {}", e);
            if !task.from.is_empty() {
                deliver::deliver_error(
                    &config,
                    &task,
                    "Failed to generate newsletter. Please try again.",
                )
                .await;
            }
        }
    }

    Ok(())
}

pub use self::function_handler as handler;
