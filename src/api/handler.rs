//! API Lambda handler - thin router that delegates to specialized handlers.
//!
//! This module handles:
//! - Published newsletter pages (`GET /n/{id}`)
//! - Phone signup (`POST /api/signup`)
//! - Web-form generation (`POST /api/generate`)
//! - Twilio SMS webhooks (`POST /sms/webhook`, delegated to `webhook`)

use lambda_runtime::{Error, LambdaEvent};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{error, info};
use uuid::Uuid;

use super::{helpers, parsing, sqs, webhook};
use crate::core::config::AppConfig;
use crate::core::models::GenerationTask;
use crate::core::phones;
use crate::sms::WELCOME_MESSAGE;
use crate::storage::NewsletterStore;

pub use self::function_handler as handler;

const SMS_ACK_TIMEOUT_MS: u64 = 2000;

/// Lambda handler for the API entrypoint.
///
/// Routes requests to specialized handlers based on path.
///
/// # Errors
///
/// Returns an error response payload if the request is malformed or fails
/// Twilio signature verification; otherwise returns a 200 with a JSON body.
#[tracing::instrument(level = "info", skip(event))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<impl Serialize, Error> {
    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;

    let path = event
        .payload
        .get("rawPath")
        .and_then(|v| v.as_str())
        .or_else(|| event.payload.get("path").and_then(|v| v.as_str()))
        .unwrap_or("");
    info!(raw_path = %path, "API Lambda received request");

    // ========================================================================
    // Published pages: plain GETs, nothing signed
    // ========================================================================

    if let Some(id) = path.strip_prefix("/n/") {
        return Ok(serve_newsletter(&config, id).await);
    }

    // ========================================================================
    // Everything else needs headers and a body
    // ========================================================================

    let Some(headers) = event.payload.get("headers") else {
        error!("Request missing headers");
        return Ok(helpers::err_response(400, "Missing headers"));
    };

    let body = match extract_body(&event.payload) {
        Ok(b) => b,
        Err(response) => return Ok(response),
    };

    if path.ends_with("/api/signup") {
        return Ok(handle_signup(&config, body).await);
    }

    if path.ends_with("/api/generate") {
        return Ok(handle_generate(&config, body).await);
    }

    if path.ends_with("/sms/webhook") {
        let params = match parsing::parse_form_params(body) {
            Ok(p) => p,
            Err(e) => {
                error!("Webhook form parse error: {}", e);
                return Ok(helpers::err_response(400, &format!("Parse Error: {e}")));
            }
        };
        return Ok(webhook::handle_sms_webhook(&config, path, headers, &params).await);
    }

    Ok(helpers::err_response(404, "Not found"))
}

async fn serve_newsletter(config: &AppConfig, id: &str) -> Value {
    let store = NewsletterStore::new(&config.storage_path, &config.base_url);
    match store.load(id).await {
        Ok(Some(html)) => helpers::html_response(&html),
        Ok(None) => helpers::err_response(404, "Newsletter not found"),
        Err(e) => {
            error!("Failed to load newsletter {}: {}", id, e);
            helpers::err_response(500, "Failed to load newsletter")
        }
    }
}

async fn handle_signup(config: &AppConfig, body: &str) -> Value {
    let Ok(json_body) = serde_json::from_str::<Value>(body) else {
        return helpers::err_response(400, "Invalid JSON body");
    };
    let Some(phone) = json_body.get("phone").and_then(|p| p.as_str()) else {
        return helpers::err_response(400, "Phone number is required");
    };
    if !parsing::is_valid_phone(phone) {
        return helpers::err_response(
            400,
            "Invalid phone number format. Include country code (e.g., +1234567890)",
        );
    }

    let newly_registered = match phones::register_phone(config, phone).await {
        Ok(newly) => newly,
        Err(e) => {
            error!("Signup failed for {}: {}", phone, e);
            return helpers::err_response(500, "Failed to process signup");
        }
    };

    // Returning subscribers get the welcome text again as a reminder.
    helpers::send_sms_with_timeout(config, phone, WELCOME_MESSAGE, SMS_ACK_TIMEOUT_MS).await;

    let message = if newly_registered {
        "Signup successful! Check your phone for instructions."
    } else {
        "You are already registered! Welcome message sent."
    };
    helpers::ok_json(&json!({ "success": true, "message": message }))
}

/// Web-form generation, bypassing SMS. The slow work still goes through the
/// queue; the caller gets a correlation id back, and the finished link is
/// texted to the optional delivery phone.
async fn handle_generate(config: &AppConfig, body: &str) -> Value {
    let request = match parsing::parse_generate_request(body) {
        Ok(r) => r,
        Err(message) => return helpers::err_response(400, &message),
    };

    let correlation_id = Uuid::new_v4().to_string();
    info!(
        "Web generate request: topic=\"{}\", tone=\"{}\", correlation_id={}",
        request.topic, request.tone, correlation_id
    );

    let task = GenerationTask {
        correlation_id: correlation_id.clone(),
        from: request.phone.unwrap_or_default(),
        topic: request.topic,
        tone: request.tone,
    };

    if let Err(e) = sqs::enqueue_task(config, &task).await {
        error!(
            "Failed to enqueue web task (correlation_id={}): {}",
            correlation_id, e
        );
        return helpers::err_response(500, "Failed to start newsletter generation");
    }

    let message = if task.from.is_empty() {
        "Newsletter generation started."
    } else {
        "Newsletter generation started. The link will be texted to you."
    };
    helpers::ok_json(&json!({
        "success": true,
        "message": message,
        "correlation_id": correlation_id
    }))
}

fn extract_body(payload: &Value) -> Result<&str, Value> {
    let Some(body) = payload.get("body") else {
        error!("Request missing body");
        return Err(helpers::err_response(400, "Missing body"));
    };

    let Some(body_str) = body.as_str() else {
        error!("Request body is not a string");
        return Err(helpers::err_response(400, "Invalid body format"));
    };

    Ok(body_str)
}
