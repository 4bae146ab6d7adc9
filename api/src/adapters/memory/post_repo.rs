//! In-memory implementation of PostRepository

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::seed::sample_posts;
use crate::domain::entities::{Comment, CommentId, NewComment, NewPost, Post, PostId, Rating};
use crate::domain::ports::PostRepository;
use crate::error::DomainError;

/// Posts kept in insertion order, newest first
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with the sample community feed
    pub fn with_sample_posts() -> Self {
        Self {
            posts: RwLock::new(sample_posts(Utc::now())),
        }
    }

    /// Pre-populate with a post (placed at the top of the feed)
    #[cfg(test)]
    pub fn with_post(self, post: Post) -> Self {
        if let Ok(mut posts) = self.posts.write() {
            posts.insert(0, post);
        }
        self
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Post>>, DomainError> {
        self.posts
            .read()
            .map_err(|_| DomainError::Internal("post store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Post>>, DomainError> {
        self.posts
            .write()
            .map_err(|_| DomainError::Internal("post store lock poisoned".to_string()))
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.read()?.clone())
    }

    async fn find_post(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        Ok(self.read()?.iter().find(|p| p.id == *id).cloned())
    }

    async fn find_by_author(&self, author_id: &str) -> Result<Vec<Post>, DomainError> {
        Ok(self
            .read()?
            .iter()
            .filter(|p| p.author.id == author_id)
            .cloned()
            .collect())
    }

    async fn create_post(&self, new_post: &NewPost) -> Result<Post, DomainError> {
        let post = Post {
            id: PostId::new(),
            title: new_post.title.clone(),
            content: new_post.content.clone(),
            author: new_post.author.clone(),
            tags: new_post.tags.clone(),
            created_at: Utc::now(),
            comments: vec![],
        };

        self.write()?.insert(0, post.clone());
        Ok(post)
    }

    async fn add_comment(&self, new_comment: &NewComment) -> Result<Comment, DomainError> {
        let mut posts = self.write()?;
        let post = posts
            .iter_mut()
            .find(|p| p.id == new_comment.post_id)
            .ok_or_else(|| DomainError::NotFound(format!("Post {} not found", new_comment.post_id)))?;

        let comment = Comment {
            id: CommentId::new(),
            post_id: new_comment.post_id,
            author: new_comment.author.clone(),
            content: new_comment.content.clone(),
            created_at: Utc::now(),
            helpful: 0,
            not_helpful: 0,
            is_ai: new_comment.is_ai,
        };

        post.comments.push(comment.clone());
        Ok(comment)
    }

    async fn rate_comment(
        &self,
        post_id: &PostId,
        comment_id: &CommentId,
        rating: Rating,
    ) -> Result<Comment, DomainError> {
        let mut posts = self.write()?;
        let comment = posts
            .iter_mut()
            .find(|p| p.id == *post_id)
            .and_then(|p| p.comments.iter_mut().find(|c| c.id == *comment_id))
            .ok_or_else(|| {
                DomainError::NotFound(format!("Comment {} on post {} not found", comment_id, post_id))
            })?;

        match rating {
            Rating::Helpful => comment.helpful += 1,
            Rating::NotHelpful => comment.not_helpful += 1,
        }

        Ok(comment.clone())
    }
}
