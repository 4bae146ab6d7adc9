//! HTTP handlers
//!
//! Axum request handlers for the API endpoints. Handlers are generic over
//! the repository and model adapters held in `AppState`.

pub mod assist;
pub mod comments;
pub mod posts;

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::{CommentId, PostId};
use crate::error::AppError;

pub use assist::{draft_post, suggest_tags};
pub use comments::{add_ai_comment, add_comment, feedback_summary, rate_comment};
pub use posts::{create_post, dashboard, get_post, list_posts, list_tags};

/// Body returned when moderation refuses a submission
#[derive(Debug, Serialize)]
pub struct RejectedResponse {
    pub published: bool,
    pub message: String,
}

/// 422 carrying the rejection message verbatim
pub(crate) fn rejected(message: String) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(RejectedResponse {
            published: false,
            message,
        }),
    )
        .into_response()
}

pub(crate) fn parse_post_id(raw: &str) -> Result<PostId, AppError> {
    Uuid::parse_str(raw)
        .map(PostId)
        .map_err(|_| AppError::BadRequest(format!("Invalid post id: {}", raw)))
}

pub(crate) fn parse_comment_id(raw: &str) -> Result<CommentId, AppError> {
    Uuid::parse_str(raw)
        .map(CommentId)
        .map_err(|_| AppError::BadRequest(format!("Invalid comment id: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids() {
        let id = Uuid::new_v4();
        assert_eq!(parse_post_id(&id.to_string()).unwrap(), PostId(id));
        assert_eq!(parse_comment_id(&id.to_string()).unwrap(), CommentId(id));
        assert!(matches!(
            parse_post_id("not-a-uuid"),
            Err(AppError::BadRequest(_))
        ));
    }
}
