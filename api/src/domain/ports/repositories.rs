//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (in-memory, PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{Comment, CommentId, NewComment, NewPost, Post, PostId, Rating};
use crate::error::DomainError;

/// Repository for posts and their comments
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// List all posts, newest first, each with its comments
    async fn list_posts(&self) -> Result<Vec<Post>, DomainError>;

    /// Find a post by ID
    async fn find_post(&self, id: &PostId) -> Result<Option<Post>, DomainError>;

    /// List posts written by an author, newest first
    async fn find_by_author(&self, author_id: &str) -> Result<Vec<Post>, DomainError>;

    /// Create a new post
    async fn create_post(&self, post: &NewPost) -> Result<Post, DomainError>;

    /// Append a comment to an existing post
    async fn add_comment(&self, comment: &NewComment) -> Result<Comment, DomainError>;

    /// Increment the helpful or not-helpful counter of a comment
    async fn rate_comment(
        &self,
        post_id: &PostId,
        comment_id: &CommentId,
        rating: Rating,
    ) -> Result<Comment, DomainError>;
}
