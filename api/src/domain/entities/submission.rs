//! Submission and moderation domain types
//!
//! A `SubmittedText` lives only for the duration of one moderation decision.
//! Neither it nor the resulting `ModerationVerdict` is ever persisted.

use serde::{Deserialize, Serialize};

/// Prefix of every user-facing rejection message
pub const REJECTION_PREFIX: &str = "This submission cannot be published. Reason: ";

/// Used when a classifier flags content without saying why.
/// A flagged verdict always rejects, reason or not.
const UNSPECIFIED_REASON: &str = "it may not meet our community guidelines";

/// What kind of content is being submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    Post,
    Comment,
}

impl std::fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionKind::Post => write!(f, "post"),
            SubmissionKind::Comment => write!(f, "comment"),
        }
    }
}

/// User-authored text awaiting a publish decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedText {
    pub kind: SubmissionKind,
    /// Post title; always `None` for comments
    pub title: Option<String>,
    pub text: String,
}

impl SubmittedText {
    pub fn post(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: SubmissionKind::Post,
            title: Some(title.into()),
            text: body.into(),
        }
    }

    pub fn comment(body: impl Into<String>) -> Self {
        Self {
            kind: SubmissionKind::Comment,
            title: None,
            text: body.into(),
        }
    }

    /// Characters in the classification input once surrounding whitespace
    /// is trimmed. For posts this includes the title.
    pub fn trimmed_len(&self) -> usize {
        self.classification_input().trim().chars().count()
    }

    /// The exact string handed to the classifier: `"{title}\n{body}"` for
    /// posts, the body alone otherwise.
    pub fn classification_input(&self) -> String {
        match (&self.kind, &self.title) {
            (SubmissionKind::Post, Some(title)) => format!("{}\n{}", title, self.text),
            _ => self.text.clone(),
        }
    }
}

/// Classifier output for one submission
///
/// `reason` and `categories` are `None` whenever `flagged` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationVerdict {
    pub flagged: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl ModerationVerdict {
    pub fn clean() -> Self {
        Self {
            flagged: false,
            reason: None,
            categories: None,
        }
    }

    #[cfg(test)]
    pub fn flagged(reason: impl Into<String>, categories: Vec<String>) -> Self {
        Self {
            flagged: true,
            reason: Some(reason.into()),
            categories: Some(categories),
        }
    }

    /// Enforce the presence rules on raw classifier output.
    ///
    /// Unflagged verdicts lose any stray reason/categories. Flagged verdicts
    /// get a blank reason replaced and a missing category list defaulted to
    /// empty.
    pub fn normalized(self) -> Self {
        if !self.flagged {
            return Self::clean();
        }

        let reason = self
            .reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| UNSPECIFIED_REASON.to_string());

        Self {
            flagged: true,
            reason: Some(reason),
            categories: Some(self.categories.unwrap_or_default()),
        }
    }
}

/// Outcome of the moderation gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateResult {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_message: Option<String>,
}

impl GateResult {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            rejection_message: None,
        }
    }

    pub fn reject(reason: &str) -> Self {
        Self {
            allowed: false,
            rejection_message: Some(format!("{}{}", REJECTION_PREFIX, reason)),
        }
    }

    /// Translate a classifier verdict into a publish decision
    pub fn from_verdict(verdict: &ModerationVerdict) -> Self {
        if verdict.flagged {
            Self::reject(verdict.reason.as_deref().unwrap_or(UNSPECIFIED_REASON))
        } else {
            Self::allow()
        }
    }
}
