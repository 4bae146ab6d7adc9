//! Comment handlers
//!
//! Moderated comments, AI replies, ratings and feedback summaries.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{parse_comment_id, parse_post_id, rejected};
use crate::app::{AddCommentRequest, SubmissionOutcome};
use crate::domain::entities::{relative_time, Author, Comment, Rating};
use crate::domain::ports::{ContentClassifier, PostRepository, TextGenerator};
use crate::error::AppError;
use crate::AppState;

/// Comment as rendered to clients
#[derive(Debug, Serialize)]
pub struct CommentView {
    pub id: String,
    pub post_id: String,
    pub author: Author,
    pub content: String,
    pub created_at: String,
    pub posted: String,
    pub helpful: i32,
    pub not_helpful: i32,
    pub is_ai: bool,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            post_id: comment.post_id.to_string(),
            author: comment.author,
            content: comment.content,
            created_at: comment.created_at.to_rfc3339(),
            posted: relative_time(comment.created_at, Utc::now()),
            helpful: comment.helpful,
            not_helpful: comment.not_helpful,
            is_ai: comment.is_ai,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentPublishedResponse {
    pub published: bool,
    pub comment: CommentView,
}

#[derive(Debug, Deserialize)]
pub struct RateCommentRequest {
    pub rating: Rating,
}

#[derive(Debug, Serialize)]
pub struct FeedbackSummaryResponse {
    pub summary: String,
}

/// POST /posts/:id/comments
pub async fn add_comment<R, C, G>(
    State(state): State<AppState<R, C, G>>,
    Path(id): Path<String>,
    Json(request): Json<AddCommentRequest>,
) -> Result<Response, AppError>
where
    R: PostRepository + 'static,
    C: ContentClassifier + 'static,
    G: TextGenerator + 'static,
{
    let post_id = parse_post_id(&id)?;

    match state.submissions.add_comment(&post_id, request).await? {
        SubmissionOutcome::Published(comment) => Ok((
            StatusCode::CREATED,
            Json(CommentPublishedResponse {
                published: true,
                comment: CommentView::from(comment),
            }),
        )
            .into_response()),
        SubmissionOutcome::Rejected { message } => Ok(rejected(message)),
    }
}

/// POST /posts/:id/comments/ai
///
/// Always answers with a comment; generation failures fall back to a
/// canned reply.
pub async fn add_ai_comment<R, C, G>(
    State(state): State<AppState<R, C, G>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<CommentView>), AppError>
where
    R: PostRepository + 'static,
    C: ContentClassifier + 'static,
    G: TextGenerator + 'static,
{
    let post_id = parse_post_id(&id)?;
    let comment = state.assist.empathetic_reply(&post_id).await?;
    Ok((StatusCode::CREATED, Json(CommentView::from(comment))))
}

/// POST /posts/:id/comments/:comment_id/rating
pub async fn rate_comment<R, C, G>(
    State(state): State<AppState<R, C, G>>,
    Path((id, comment_id)): Path<(String, String)>,
    Json(request): Json<RateCommentRequest>,
) -> Result<Json<CommentView>, AppError>
where
    R: PostRepository + 'static,
    C: ContentClassifier + 'static,
    G: TextGenerator + 'static,
{
    let post_id = parse_post_id(&id)?;
    let comment_id = parse_comment_id(&comment_id)?;

    let comment = state
        .feed
        .rate_comment(&post_id, &comment_id, request.rating)
        .await?;

    Ok(Json(CommentView::from(comment)))
}

/// GET /posts/:id/feedback-summary
pub async fn feedback_summary<R, C, G>(
    State(state): State<AppState<R, C, G>>,
    Path(id): Path<String>,
) -> Result<Json<FeedbackSummaryResponse>, AppError>
where
    R: PostRepository + 'static,
    C: ContentClassifier + 'static,
    G: TextGenerator + 'static,
{
    let post_id = parse_post_id(&id)?;
    let summary = state.assist.summarize_feedback(&post_id).await?;
    Ok(Json(FeedbackSummaryResponse { summary }))
}
