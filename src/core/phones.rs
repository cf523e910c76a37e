//! Subscriber phone registry backed by SSM Parameter Store.
//!
//! One parameter per phone number under a configurable prefix, so the
//! registry survives Lambda cold starts without a database.

use aws_sdk_ssm::{Client as SsmClient, types::ParameterType};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::config::AppConfig;
use crate::errors::NewsletterError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPhone {
    pub phone: String,
    pub registered_at: String,
}

fn key_for_phone(prefix: &str, phone: &str) -> String {
    let mut p = prefix.to_string();
    if !p.ends_with('/') {
        p.push('/');
    }
    // '+' is not a valid SSM parameter name character
    format!("{p}{}", phone.trim_start_matches('+'))
}

/// Register a phone number. Returns `false` when it was already registered.
///
/// # Errors
///
/// Returns an error if SSM operations fail or JSON serialization fails.
pub async fn register_phone(config: &AppConfig, phone: &str) -> Result<bool, NewsletterError> {
    if is_registered(config, phone).await? {
        return Ok(false);
    }

    let shared = aws_config::from_env().load().await;
    let client = SsmClient::new(&shared);
    let name = key_for_phone(&config.phone_param_prefix, phone);
    let record = StoredPhone {
        phone: phone.to_string(),
        registered_at: Utc::now().to_rfc3339(),
    };
    let value = serde_json::to_string(&record)
        .map_err(|e| NewsletterError::GeneralError(format!("phone serialize: {e}")))?;

    client
        .put_parameter()
        .name(name)
        .value(value)
        .r#type(ParameterType::String)
        .overwrite(true)
        .send()
        .await
        .map_err(|e| NewsletterError::AwsError(format!("ssm put_parameter: {e}")))?;

    Ok(true)
}

/// # Errors
///
/// Returns an error if SSM operations fail for a reason other than the
/// parameter being absent.
pub async fn is_registered(config: &AppConfig, phone: &str) -> Result<bool, NewsletterError> {
    let shared = aws_config::from_env().load().await;
    let client = SsmClient::new(&shared);
    let name = key_for_phone(&config.phone_param_prefix, phone);

    match client.get_parameter().name(name).send().await {
        Ok(resp) => Ok(resp.parameter.is_some()),
        Err(e) => {
            // Absent parameters are not errors; anything else bubbles up.
            let msg = format!("{e}");
            if msg.contains("ParameterNotFound") {
                Ok(false)
            } else {
                Err(NewsletterError::AwsError(format!("ssm get_parameter: {e}")))
            }
        }
    }
}
