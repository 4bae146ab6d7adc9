//! Post handlers
//!
//! Feed, tag list, post detail, moderated post creation and the member
//! dashboard.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::comments::CommentView;
use super::{parse_post_id, rejected};
use crate::app::{CreatePostRequest, DashboardEntry, SubmissionOutcome};
use crate::domain::entities::{relative_time, Author, Post};
use crate::domain::ports::{ContentClassifier, PostRepository, TextGenerator};
use crate::error::AppError;
use crate::AppState;

/// Feed query params
#[derive(Debug, Default, Deserialize)]
pub struct FeedParams {
    /// Comma-separated tags; a post must carry all of them
    #[serde(default)]
    pub tags: Option<String>,
}

impl FeedParams {
    fn selected_tags(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// Post as rendered to clients
#[derive(Debug, Serialize)]
pub struct PostView {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: Author,
    pub tags: Vec<String>,
    pub created_at: String,
    /// Human-readable age, e.g. "3 days ago"
    pub posted: String,
    pub comment_count: usize,
    pub comments: Vec<CommentView>,
}

impl From<Post> for PostView {
    fn from(post: Post) -> Self {
        let now = Utc::now();
        Self {
            id: post.id.to_string(),
            title: post.title,
            content: post.content,
            author: post.author,
            tags: post.tags,
            created_at: post.created_at.to_rfc3339(),
            posted: relative_time(post.created_at, now),
            comment_count: post.comments.len(),
            comments: post.comments.into_iter().map(CommentView::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub posts: Vec<PostView>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct TagsResponse {
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PostPublishedResponse {
    pub published: bool,
    pub post: PostView,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub author: Author,
    pub posts: Vec<DashboardEntry>,
}

/// GET /posts
pub async fn list_posts<R, C, G>(
    State(state): State<AppState<R, C, G>>,
    Query(params): Query<FeedParams>,
) -> Result<Json<FeedResponse>, AppError>
where
    R: PostRepository + 'static,
    C: ContentClassifier + 'static,
    G: TextGenerator + 'static,
{
    let posts = state.feed.list_posts(&params.selected_tags()).await?;

    Ok(Json(FeedResponse {
        total: posts.len(),
        posts: posts.into_iter().map(PostView::from).collect(),
    }))
}

/// GET /tags
pub async fn list_tags<R, C, G>(
    State(state): State<AppState<R, C, G>>,
) -> Result<Json<TagsResponse>, AppError>
where
    R: PostRepository + 'static,
    C: ContentClassifier + 'static,
    G: TextGenerator + 'static,
{
    let tags = state.feed.list_tags().await?;
    Ok(Json(TagsResponse { tags }))
}

/// GET /posts/:id
pub async fn get_post<R, C, G>(
    State(state): State<AppState<R, C, G>>,
    Path(id): Path<String>,
) -> Result<Json<PostView>, AppError>
where
    R: PostRepository + 'static,
    C: ContentClassifier + 'static,
    G: TextGenerator + 'static,
{
    let post_id = parse_post_id(&id)?;
    let post = state.feed.get_post(&post_id).await?;
    Ok(Json(PostView::from(post)))
}

/// POST /posts
///
/// 201 when published, 422 with the rejection message when moderation
/// refuses the post.
pub async fn create_post<R, C, G>(
    State(state): State<AppState<R, C, G>>,
    Json(request): Json<CreatePostRequest>,
) -> Result<Response, AppError>
where
    R: PostRepository + 'static,
    C: ContentClassifier + 'static,
    G: TextGenerator + 'static,
{
    match state.submissions.create_post(request).await? {
        SubmissionOutcome::Published(post) => Ok((
            StatusCode::CREATED,
            Json(PostPublishedResponse {
                published: true,
                post: PostView::from(post),
            }),
        )
            .into_response()),
        SubmissionOutcome::Rejected { message } => Ok(rejected(message)),
    }
}

/// GET /dashboard
pub async fn dashboard<R, C, G>(
    State(state): State<AppState<R, C, G>>,
) -> Result<Json<DashboardResponse>, AppError>
where
    R: PostRepository + 'static,
    C: ContentClassifier + 'static,
    G: TextGenerator + 'static,
{
    let author = Author::member();
    let posts = state.feed.dashboard(&author.id).await?;
    Ok(Json(DashboardResponse { author, posts }))
}
