//! Handler for inbound Twilio SMS webhooks.
//!
//! The webhook must ack quickly, so anything slow (generation) is queued to
//! the worker and anything user-facing (hints, errors, welcomes) goes out as
//! fire-and-forget SMS.

use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{error, info};
use uuid::Uuid;

use super::helpers::{self, ok_text, send_sms_with_timeout};
use super::parsing::{get_header_value, parse_webhook_event};
use super::signature;
use super::sqs;
use crate::command::parse_command;
use crate::core::{config::AppConfig, models::GenerationTask, phones};
use crate::sms::{USAGE_HINT, WELCOME_MESSAGE};

const SMS_ACK_TIMEOUT_MS: u64 = 2000;

/// Handle one Twilio SMS webhook call.
///
/// `path` is the request path the webhook was posted to; together with the
/// configured base URL it reconstructs the exact URL Twilio signed.
pub async fn handle_sms_webhook(
    config: &AppConfig,
    path: &str,
    headers: &Value,
    params: &BTreeMap<String, String>,
) -> Value {
    if let Err(response) = verify_signature(config, path, headers, params) {
        return response;
    }

    let event = parse_webhook_event(params);
    info!("Received SMS from {}: {}", event.from, event.body);

    if event.from.is_empty() {
        error!("Webhook payload missing From parameter");
        return helpers::err_response(400, "Missing From parameter");
    }

    // First contact registers the sender and gets them the instructions.
    match phones::is_registered(config, &event.from).await {
        Ok(false) => {
            if let Err(e) = phones::register_phone(config, &event.from).await {
                error!("Failed to auto-register {}: {}", event.from, e);
            }
            send_sms_with_timeout(config, &event.from, WELCOME_MESSAGE, SMS_ACK_TIMEOUT_MS).await;
        }
        Ok(true) => {}
        Err(e) => error!("Failed to check registration for {}: {}", event.from, e),
    }

    let Some(command) = parse_command(&event.body) else {
        // Not addressed to us; nudge instead of failing.
        send_sms_with_timeout(config, &event.from, USAGE_HINT, SMS_ACK_TIMEOUT_MS).await;
        return ok_text("OK");
    };

    let Some(topic) = command.topic else {
        send_sms_with_timeout(
            config,
            &event.from,
            "Error: Topic is required. Format: newsletter: topic = your topic",
            SMS_ACK_TIMEOUT_MS,
        )
        .await;
        return ok_text("OK");
    };

    let correlation_id = Uuid::new_v4().to_string();
    info!(
        "Webhook enqueueing generation, correlation_id={}",
        correlation_id
    );

    let task = GenerationTask {
        correlation_id: correlation_id.clone(),
        from: event.from.clone(),
        topic,
        tone: command.tone,
    };

    if let Err(e) = sqs::enqueue_task(config, &task).await {
        error!(
            "Failed to enqueue task (correlation_id={}): {}",
            correlation_id, e
        );
        send_sms_with_timeout(
            config,
            &event.from,
            "Error: Failed to start newsletter generation. Please try again.",
            SMS_ACK_TIMEOUT_MS,
        )
        .await;
    }

    ok_text("OK")
}

fn verify_signature(
    config: &AppConfig,
    path: &str,
    headers: &Value,
    params: &BTreeMap<String, String>,
) -> Result<(), Value> {
    let Some(auth_token) = &config.twilio_auth_token else {
        // No Twilio credentials configured (local development); nothing to
        // verify against.
        return Ok(());
    };

    let Some(sig) = get_header_value(headers, "X-Twilio-Signature") else {
        error!("Missing X-Twilio-Signature header");
        return Err(helpers::err_response(
            401,
            "Missing X-Twilio-Signature header",
        ));
    };

    let url = format!("{}{}", config.base_url.trim_end_matches('/'), path);
    if !signature::verify_twilio_signature(auth_token, &url, params, sig) {
        error!("Twilio signature verification failed");
        return Err(helpers::err_response(401, "Invalid Twilio signature"));
    }

    Ok(())
}
