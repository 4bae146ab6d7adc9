//! Language model adapter
//!
//! Implements the AI ports against any OpenAI-compatible HTTP API.

pub mod client;

pub use client::OpenAiClient;
