//! Submission moderation gate
//!
//! Decides whether one unit of user-authored text may be published.
//! Per submission the gate moves through
//! `Received -> {ShortCircuitAllowed | Classifying} -> {Allowed | Rejected | ClassificationFailed}`.
//!
//! The gate never persists anything and keeps no state between calls, so any
//! number of evaluations may run concurrently. Dropping the returned future
//! abandons the in-flight classification.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{GateResult, SubmittedText};
use crate::domain::ports::ContentClassifier;
use crate::error::ModerationError;

/// Submissions shorter than this (after trimming) skip classification
pub const MIN_CLASSIFIABLE_CHARS: usize = 10;

/// Moderation policy handed to the classifier with every submission
pub const MODERATION_INSTRUCTIONS: &str = r#"You are a content moderator for a mental health support platform called "FeelFree". Your primary responsibility is to ensure the safety and well-being of the community by identifying and flagging harmful content.

Analyze the content provided by the user. The content must be flagged if it contains any of the following:
- Explicit self-harm ideation or encouragement.
- Threats of violence against others.
- Bullying or harassment of individuals or groups.
- Hate speech based on race, religion, gender, sexual orientation, etc.
- Glorification of eating disorders or other harmful behaviors.
- Graphic or violent descriptions.
- Spam or malicious links.

Respond with a single JSON object:
- If the content is safe: {"flagged": false}
- If the content violates any of these rules: {"flagged": true, "reason": "<brief, non-judgmental explanation>", "categories": ["<violated category>", ...]}

Only include "reason" and "categories" when "flagged" is true."#;

/// Moderation gate over a content classifier
pub struct ModerationGate<C>
where
    C: ContentClassifier,
{
    classifier: Arc<C>,
    timeout: Duration,
}

impl<C> ModerationGate<C>
where
    C: ContentClassifier,
{
    pub fn new(classifier: Arc<C>, timeout: Duration) -> Self {
        Self {
            classifier,
            timeout,
        }
    }

    /// Evaluate one submission.
    ///
    /// Short submissions are allowed without a classifier call. A classifier
    /// error, malformed verdict or timeout yields
    /// `ModerationError::ClassificationUnavailable`; the gate never fails open.
    pub async fn evaluate_submission(
        &self,
        submission: &SubmittedText,
    ) -> Result<GateResult, ModerationError> {
        let kind = submission.kind;

        if submission.trimmed_len() < MIN_CLASSIFIABLE_CHARS {
            tracing::debug!(
                kind = %kind,
                state = "short_circuit_allowed",
                "Submission below classification threshold"
            );
            return Ok(GateResult::allow());
        }

        let content = submission.classification_input();
        tracing::debug!(
            kind = %kind,
            state = "classifying",
            content_length = content.len(),
            "Classifying submission"
        );

        let verdict = match tokio::time::timeout(
            self.timeout,
            self.classifier.classify(&content, MODERATION_INSTRUCTIONS),
        )
        .await
        {
            Ok(Ok(verdict)) => verdict.normalized(),
            Ok(Err(e)) => {
                tracing::warn!(
                    kind = %kind,
                    state = "classification_failed",
                    error = %e,
                    "Classifier call failed"
                );
                return Err(ModerationError::ClassificationUnavailable(e.to_string()));
            }
            Err(_) => {
                tracing::warn!(
                    kind = %kind,
                    state = "classification_failed",
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Classifier call timed out"
                );
                return Err(ModerationError::ClassificationUnavailable(format!(
                    "classification timed out after {:?}",
                    self.timeout
                )));
            }
        };

        let result = GateResult::from_verdict(&verdict);
        if result.allowed {
            tracing::debug!(kind = %kind, state = "allowed", "Submission allowed");
        } else {
            tracing::info!(
                kind = %kind,
                state = "rejected",
                categories = ?verdict.categories.unwrap_or_default(),
                "Submission rejected by moderation"
            );
        }

        Ok(result)
    }
}
