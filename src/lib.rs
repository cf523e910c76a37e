//! Kochi turns a short SMS request into a published, shareable newsletter
//! page.
//!
//! The crate implements a two-Lambda architecture:
//! 1. An API Lambda that receives Twilio SMS webhooks, signups, and
//!    web-form generation requests, verifies them, and queues generation
//!    tasks
//! 2. A Worker Lambda that processes queued tasks: it generates newsletter
//!    prose with OpenAI, recovers structure from it, renders a standalone
//!    HTML page, stores it, and texts the requester a shareable link
//!
//! The system uses:
//! - AWS Lambda for serverless execution
//! - SQS for task queuing between Lambdas
//! - SSM Parameter Store for the subscriber phone registry
//! - Twilio for SMS transport
//! - Tokio for the async runtime
//!
//! The hardened heart of the crate is the text-extraction subsystem in
//! [`command`] and [`extractor`]: the upstream generator is prompted to use
//! a fixed `TITLE/INTRO/SECTION n/CLOSING` template but does not reliably
//! comply, so extraction degrades through a cascade of heuristics instead
//! of ever failing on format drift.
//!
//! # Example
//!
//! ```
//! use kochi::command::parse_command;
//! use kochi::extractor::extract_newsletter;
//!
//! let cmd = parse_command("newsletter: topic = crypto, tone = casual").unwrap();
//! let topic = cmd.topic.unwrap();
//!
//! // The raw text would normally come from the generator.
//! let raw = "TITLE: Crypto Weekly\n\nINTRO: Markets moved.\n\n\
//!            SECTION 1: Prices\nBitcoin rose 5%.";
//! let document = extract_newsletter(raw, &topic);
//! assert_eq!(document.title, "Crypto Weekly");
//! assert_eq!(document.sections.len(), 1);
//! ```

pub mod ai;
pub mod api;
pub mod command;
pub mod core;
pub mod errors;
pub mod extractor;
pub mod prompt;
pub mod render;
pub mod sms;
pub mod storage;
pub mod worker;

pub use command::{ParsedCommand, parse_command};
pub use errors::NewsletterError;
pub use extractor::{NewsletterDocument, Section, extract_newsletter};

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Sets up tracing-subscriber with a JSON formatter suitable for CloudWatch
/// Logs integration. Call once at the start of each Lambda entrypoint.
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry().with(fmt_layer).init();
}
