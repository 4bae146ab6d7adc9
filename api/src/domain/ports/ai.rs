//! Language model port traits
//!
//! The model is treated as an opaque text-in, structured-output-out
//! function with no latency guarantee. Callers own their prompts and
//! bound every call with a timeout.

use async_trait::async_trait;

use crate::domain::entities::ModerationVerdict;
use crate::error::AiError;

/// Classifies user content against a moderation policy
#[async_trait]
pub trait ContentClassifier: Send + Sync {
    /// Classify `content` following `instructions`.
    ///
    /// Returns `AiError::Malformed` when the model output is not a verdict.
    async fn classify(
        &self,
        content: &str,
        instructions: &str,
    ) -> Result<ModerationVerdict, AiError>;
}

/// Generates structured text for the assist features
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run `instructions` against `input` and return the model's JSON object
    async fn generate_json(
        &self,
        instructions: &str,
        input: &str,
    ) -> Result<serde_json::Value, AiError>;
}
