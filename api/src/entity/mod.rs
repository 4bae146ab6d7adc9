//! SeaORM entities
//!
//! Table models for the PostgreSQL adapter. Schema lives in
//! `api/migrations/0001_create_posts_and_comments.sql`.

pub mod comments;
pub mod posts;
