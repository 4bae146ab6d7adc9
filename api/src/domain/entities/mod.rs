//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod post;
pub mod submission;

pub use post::{
    normalize_tags, relative_time, Author, Comment, CommentId, NewComment, NewPost, Post, PostId,
    Rating,
};
pub use submission::{GateResult, ModerationVerdict, SubmittedText};
