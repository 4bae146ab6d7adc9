//! PostgreSQL adapter for PostRepository
//!
//! Requires the schema from `api/migrations/0001_create_posts_and_comments.sql`.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::entities::{
    Author, Comment, CommentId, NewComment, NewPost, Post, PostId, Rating,
};
use crate::domain::ports::PostRepository;
use crate::entity::{comments, posts};
use crate::error::DomainError;

/// PostgreSQL implementation of PostRepository
pub struct PostgresPostRepository {
    db: DatabaseConnection,
}

impl PostgresPostRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load_with_comments(
        &self,
        query: sea_orm::Select<posts::Entity>,
    ) -> Result<Vec<Post>, DomainError> {
        let rows = query
            .order_by_desc(posts::Column::CreatedAt)
            .find_with_related(comments::Entity)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let mut result = rows
            .into_iter()
            .map(|(post, comments)| to_post(post, comments))
            .collect::<Result<Vec<Post>, DomainError>>()?;
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.load_with_comments(posts::Entity::find()).await
    }

    async fn find_post(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        let mut found = self
            .load_with_comments(posts::Entity::find().filter(posts::Column::Id.eq(id.0)))
            .await?;
        Ok(found.pop())
    }

    async fn find_by_author(&self, author_id: &str) -> Result<Vec<Post>, DomainError> {
        self.load_with_comments(
            posts::Entity::find().filter(posts::Column::AuthorId.eq(author_id)),
        )
        .await
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post, DomainError> {
        let model = posts::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(post.title.clone()),
            content: Set(post.content.clone()),
            author_id: Set(post.author.id.clone()),
            author_name: Set(post.author.name.clone()),
            author_avatar: Set(post.author.avatar.clone()),
            tags: Set(serde_json::json!(post.tags)),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        to_post(result, vec![])
    }

    async fn add_comment(&self, comment: &NewComment) -> Result<Comment, DomainError> {
        let post_exists = posts::Entity::find_by_id(comment.post_id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .is_some();

        if !post_exists {
            return Err(DomainError::NotFound(format!(
                "Post {} not found",
                comment.post_id
            )));
        }

        let model = comments::ActiveModel {
            id: Set(Uuid::new_v4()),
            post_id: Set(comment.post_id.0),
            author_id: Set(comment.author.id.clone()),
            author_name: Set(comment.author.name.clone()),
            author_avatar: Set(comment.author.avatar.clone()),
            content: Set(comment.content.clone()),
            helpful: Set(0),
            not_helpful: Set(0),
            is_ai: Set(comment.is_ai),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn rate_comment(
        &self,
        post_id: &PostId,
        comment_id: &CommentId,
        rating: Rating,
    ) -> Result<Comment, DomainError> {
        let column = match rating {
            Rating::Helpful => comments::Column::Helpful,
            Rating::NotHelpful => comments::Column::NotHelpful,
        };

        let updated = comments::Entity::update_many()
            .col_expr(column, Expr::col(column).add(1))
            .filter(comments::Column::Id.eq(comment_id.0))
            .filter(comments::Column::PostId.eq(post_id.0))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if updated.rows_affected == 0 {
            return Err(DomainError::NotFound(format!(
                "Comment {} on post {} not found",
                comment_id, post_id
            )));
        }

        comments::Entity::find_by_id(comment_id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .map(Comment::from)
            .ok_or_else(|| DomainError::NotFound(format!("Comment {} not found", comment_id)))
    }
}

fn to_post(
    model: posts::Model,
    comment_models: Vec<comments::Model>,
) -> Result<Post, DomainError> {
    let tags: Vec<String> = serde_json::from_value(model.tags).map_err(|e| {
        DomainError::Database(format!("Post {} has unreadable tags: {}", model.id, e))
    })?;

    let mut comments: Vec<Comment> = comment_models.into_iter().map(Comment::from).collect();
    comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));

    Ok(Post {
        id: PostId(model.id),
        title: model.title,
        content: model.content,
        author: Author {
            id: model.author_id,
            name: model.author_name,
            avatar: model.author_avatar,
        },
        tags,
        created_at: model.created_at.with_timezone(&Utc),
        comments,
    })
}

/// Convert SeaORM model to domain entity
impl From<comments::Model> for Comment {
    fn from(model: comments::Model) -> Self {
        Comment {
            id: CommentId(model.id),
            post_id: PostId(model.post_id),
            author: Author {
                id: model.author_id,
                name: model.author_name,
                avatar: model.author_avatar,
            },
            content: model.content,
            created_at: model.created_at.with_timezone(&Utc),
            helpful: model.helpful,
            not_helpful: model.not_helpful,
            is_ai: model.is_ai,
        }
    }
}
