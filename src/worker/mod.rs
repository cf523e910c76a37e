//! Worker Lambda: consumes queued generation tasks and publishes
//! newsletters.

pub mod deliver;
pub mod generate;
pub mod handler;

pub use handler::handler;
