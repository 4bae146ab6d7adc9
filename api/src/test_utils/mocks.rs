//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They record their inputs and allow tests to verify behavior.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::entities::ModerationVerdict;
use crate::domain::ports::{ContentClassifier, TextGenerator};
use crate::error::AiError;

// ============================================================================
// Stub Classifier
// ============================================================================

enum ClassifierBehavior {
    Verdict(ModerationVerdict),
    Fail,
    Hang,
}

/// Deterministic classifier that counts calls and records what it was sent
pub struct StubClassifier {
    behavior: ClassifierBehavior,
    calls: AtomicUsize,
    inputs: Mutex<Vec<String>>,
    instructions: Mutex<Option<String>>,
}

impl StubClassifier {
    fn with_behavior(behavior: ClassifierBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            inputs: Mutex::new(Vec::new()),
            instructions: Mutex::new(None),
        }
    }

    /// Always returns `{flagged: false}`
    pub fn allowing() -> Self {
        Self::with_behavior(ClassifierBehavior::Verdict(ModerationVerdict::clean()))
    }

    /// Always returns the verdict exactly as given, without normalization
    pub fn returning(verdict: ModerationVerdict) -> Self {
        Self::with_behavior(ClassifierBehavior::Verdict(verdict))
    }

    /// Simulates an unreachable model
    pub fn failing() -> Self {
        Self::with_behavior(ClassifierBehavior::Fail)
    }

    /// Never answers within any reasonable timeout
    pub fn hanging() -> Self {
        Self::with_behavior(ClassifierBehavior::Hang)
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }

    pub fn last_instructions(&self) -> Option<String> {
        self.instructions.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentClassifier for StubClassifier {
    async fn classify(
        &self,
        content: &str,
        instructions: &str,
    ) -> Result<ModerationVerdict, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inputs.lock().unwrap().push(content.to_string());
        *self.instructions.lock().unwrap() = Some(instructions.to_string());

        match &self.behavior {
            ClassifierBehavior::Verdict(verdict) => Ok(verdict.clone()),
            ClassifierBehavior::Fail => Err(AiError::Api {
                status: 503,
                message: "upstream unavailable".to_string(),
            }),
            ClassifierBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(ModerationVerdict::clean())
            }
        }
    }
}

// ============================================================================
// Scripted Text Generator
// ============================================================================

/// Generator that replays queued responses, then repeats a fallback response
pub struct ScriptedGenerator {
    queue: Mutex<VecDeque<Result<serde_json::Value, AiError>>>,
    fallback: Option<serde_json::Value>,
    calls: AtomicUsize,
    inputs: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    /// Always returns `value`
    pub fn returning(value: serde_json::Value) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: Some(value),
            calls: AtomicUsize::new(0),
            inputs: Mutex::new(Vec::new()),
        }
    }

    /// Always fails as if the model were unreachable
    pub fn failing() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: None,
            calls: AtomicUsize::new(0),
            inputs: Mutex::new(Vec::new()),
        }
    }

    /// Queue a one-off response ahead of the fallback
    pub fn then(self, response: Result<serde_json::Value, AiError>) -> Self {
        self.queue.lock().unwrap().push_back(response);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate_json(
        &self,
        _instructions: &str,
        input: &str,
    ) -> Result<serde_json::Value, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inputs.lock().unwrap().push(input.to_string());

        if let Some(response) = self.queue.lock().unwrap().pop_front() {
            return response;
        }

        self.fallback.clone().ok_or(AiError::Api {
            status: 503,
            message: "upstream unavailable".to_string(),
        })
    }
}
