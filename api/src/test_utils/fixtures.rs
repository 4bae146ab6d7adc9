//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::{Duration, Utc};

use crate::app::submission_service::{CreatePostRequest, TagsInput};
use crate::domain::entities::{Author, ModerationVerdict, Post, PostId};

/// Create a test post by the local member with no comments
pub fn test_post() -> Post {
    Post {
        id: PostId::new(),
        title: "Can't sleep again".to_string(),
        content: "Third night in a row lying awake and replaying every conversation from the day."
            .to_string(),
        author: Author::member(),
        tags: vec!["Anxiety".to_string(), "Sleep".to_string()],
        created_at: Utc::now() - Duration::hours(2),
        comments: Vec::new(),
    }
}

/// Create a post request tagged "Hope"
pub fn create_post_request(title: &str, content: &str) -> CreatePostRequest {
    CreatePostRequest {
        title: title.to_string(),
        content: content.to_string(),
        tags: TagsInput::List(vec!["Hope".to_string()]),
    }
}

/// Verdict a classifier returns for explicit self-harm content
pub fn self_harm_verdict() -> ModerationVerdict {
    ModerationVerdict::flagged("self-harm ideation", vec!["self-harm".to_string()])
}
