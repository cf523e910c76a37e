//! OpenAI generator client module.

pub mod client;

pub use client::GeneratorClient;
