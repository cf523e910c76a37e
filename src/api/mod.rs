//! API Lambda: request validation, signup, webhook routing, page serving.

pub mod handler;
pub mod helpers;
pub mod parsing;
pub mod signature;
pub mod sqs;
pub mod webhook;

pub use handler::handler;
