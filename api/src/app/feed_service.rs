//! Feed service
//!
//! Read side of the community: the feed, tag filters, post detail,
//! comment ratings and the author dashboard.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{Comment, CommentId, Post, PostId, Rating};
use crate::domain::ports::PostRepository;
use crate::error::AppError;

/// Per-post statistics shown on an author's dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardEntry {
    pub post_id: PostId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub comment_count: usize,
    pub helpful_total: i64,
}

/// Service for browsing posts
pub struct FeedService<R>
where
    R: PostRepository,
{
    posts: Arc<R>,
}

impl<R> FeedService<R>
where
    R: PostRepository,
{
    pub fn new(posts: Arc<R>) -> Self {
        Self { posts }
    }

    /// Newest posts first. With tags selected, only posts carrying every
    /// selected tag are returned.
    pub async fn list_posts(&self, tags: &[String]) -> Result<Vec<Post>, AppError> {
        let posts = self.posts.list_posts().await?;

        let selected: Vec<&str> = tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect();

        if selected.is_empty() {
            return Ok(posts);
        }

        Ok(posts
            .into_iter()
            .filter(|post| selected.iter().all(|tag| post.has_tag(tag)))
            .collect())
    }

    /// Distinct tags across the feed in first-seen order
    pub async fn list_tags(&self) -> Result<Vec<String>, AppError> {
        let posts = self.posts.list_posts().await?;
        let mut tags: Vec<String> = Vec::new();

        for tag in posts.iter().flat_map(|p| p.tags.iter()) {
            if !tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                tags.push(tag.clone());
            }
        }

        Ok(tags)
    }

    pub async fn get_post(&self, id: &PostId) -> Result<Post, AppError> {
        self.posts
            .find_post(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {}", id)))
    }

    pub async fn rate_comment(
        &self,
        post_id: &PostId,
        comment_id: &CommentId,
        rating: Rating,
    ) -> Result<Comment, AppError> {
        let comment = self.posts.rate_comment(post_id, comment_id, rating).await?;

        tracing::debug!(
            post_id = %post_id,
            comment_id = %comment_id,
            rating = %rating,
            "Comment rated"
        );

        Ok(comment)
    }

    /// Dashboard statistics for every post written by `author_id`
    pub async fn dashboard(&self, author_id: &str) -> Result<Vec<DashboardEntry>, AppError> {
        let posts = self.posts.find_by_author(author_id).await?;

        Ok(posts
            .iter()
            .map(|post| DashboardEntry {
                post_id: post.id,
                title: post.title.clone(),
                created_at: post.created_at,
                comment_count: post.comments.len(),
                helpful_total: post.helpful_total(),
            })
            .collect())
    }
}
