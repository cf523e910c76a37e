//! Newsletter generation pipeline: generate, extract, render, store.

use tracing::info;

use crate::ai::GeneratorClient;
use crate::core::{config::AppConfig, models::GenerationTask};
use crate::errors::NewsletterError;
use crate::extractor::extract_newsletter;
use crate::render::render_newsletter;
use crate::storage::{NewsletterStore, StoredNewsletter};

/// Run the full pipeline for one queued task and return the stored page.
///
/// Generation is the only step with a real failure mode; extraction always
/// recovers some structure, and the requested topic serves as the title of
/// last resort.
///
/// # Errors
///
/// Returns an error when generation or storage fails.
pub async fn process_task(
    config: &AppConfig,
    task: &GenerationTask,
) -> Result<StoredNewsletter, NewsletterError> {
    info!(
        "Processing task {} for {}: topic=\"{}\", tone=\"{}\"",
        task.correlation_id, task.from, task.topic, task.tone
    );

    let generator = GeneratorClient::new(
        config.openai_api_key.clone(),
        config.openai_org_id.clone(),
        config.openai_model.clone(),
    );
    let raw_text = generator.generate(&task.topic, &task.tone).await?;

    let document = extract_newsletter(&raw_text, &task.topic);
    info!(
        "Extracted newsletter \"{}\" with {} sections",
        document.title,
        document.sections.len()
    );

    let html = render_newsletter(&document);

    let store = NewsletterStore::new(&config.storage_path, &config.base_url);
    let stored = store.save(&html).await?;
    info!("Stored newsletter {} at {}", stored.id, stored.url);

    Ok(stored)
}
