//! Generator (OpenAI) API client module
//!
//! Encapsulates the chat-completions call that produces the raw newsletter
//! text. The response is unstructured prose; recovering structure from it is
//! the extractor's job, not this client's.

use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tokio_retry::strategy::jitter;
use tokio_retry::{Retry, strategy::ExponentialBackoff};
use tracing::info;

use crate::errors::NewsletterError;
use crate::prompt::{SYSTEM_PROMPT, build_newsletter_prompt};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const TEMPERATURE: f64 = 0.7;
const MAX_OUTPUT_TOKENS: usize = 600;
const REQUEST_TIMEOUT_SECS: u64 = 120;
const RETRY_ATTEMPTS: usize = 3;

/// Client for generating raw newsletter text.
pub struct GeneratorClient {
    api_key: String,
    org_id: Option<String>,
    model_name: String,
}

impl GeneratorClient {
    pub fn new(api_key: String, org_id: Option<String>, model_name: Option<String>) -> Self {
        Self {
            api_key,
            org_id,
            model_name: model_name.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    /// Build the chat messages for one generation request.
    pub fn build_prompt(&self, topic: &str, tone: &str) -> Vec<ChatCompletionMessage> {
        vec![
            ChatCompletionMessage {
                role: MessageRole::system,
                content: Content::Text(SYSTEM_PROMPT.to_string()),
                name: None,
                tool_calls: None,
                tool_call_id: None,
            },
            ChatCompletionMessage {
                role: MessageRole::user,
                content: Content::Text(build_newsletter_prompt(topic, tone)),
                name: None,
                tool_calls: None,
                tool_call_id: None,
            },
        ]
    }

    /// Generate raw newsletter text for a topic/tone pair.
    ///
    /// # Errors
    ///
    /// Returns an error when the OpenAI request fails after retries or the
    /// response carries no text.
    pub async fn generate(&self, topic: &str, tone: &str) -> Result<String, NewsletterError> {
        let prompt = self.build_prompt(topic, tone);

        #[cfg(feature = "debug-logs")]
        info!("Using generation prompt:\n{:?}", prompt);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            "Generating newsletter for topic \"{}\" with tone \"{}\"",
            topic, tone
        );

        let strategy = ExponentialBackoff::from_millis(100)
            .map(jitter)
            .take(RETRY_ATTEMPTS);

        Retry::spawn(strategy, || self.request_completion(&prompt)).await
    }

    async fn request_completion(
        &self,
        prompt: &[ChatCompletionMessage],
    ) -> Result<String, NewsletterError> {
        let messages: Vec<Value> = prompt
            .iter()
            .map(|msg| {
                let role_str = match msg.role {
                    MessageRole::system => "system",
                    MessageRole::user => "user",
                    MessageRole::assistant => "assistant",
                    MessageRole::function => "function",
                    MessageRole::tool => "tool",
                };

                let content_val = match &msg.content {
                    Content::Text(text) => json!(text),
                    _ => json!(""),
                };

                json!({ "role": role_str, "content": content_val })
            })
            .collect();

        let request_body = json!({
            "model": self.model_name,
            "messages": messages,
            "temperature": TEMPERATURE,
            "max_tokens": MAX_OUTPUT_TOKENS,
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        let mut request = client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body);

        if let Some(org) = &self.org_id {
            request = request.header("OpenAI-Organization", org);
        }

        let response = request
            .send()
            .await
            .map_err(|e| NewsletterError::HttpError(format!("OpenAI API request failed: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(NewsletterError::GenerationError(format!(
                "OpenAI API error: {}",
                error_text
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            NewsletterError::GenerationError(format!("Failed to parse OpenAI response: {}", e))
        })?;

        response_json
            .get("choices")
            .and_then(|choices| choices.as_array())
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .map(str::to_string)
            .ok_or_else(|| NewsletterError::GenerationError("No text in response".to_string()))
    }
}
