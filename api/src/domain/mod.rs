//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models for posts, comments and moderation
//! - `ports`: Trait definitions for persistence and the language model

pub mod entities;
pub mod ports;
