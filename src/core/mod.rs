//! Core configuration, shared models, and the subscriber registry.

pub mod config;
pub mod models;
pub mod phones;
