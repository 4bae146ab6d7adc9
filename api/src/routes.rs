//! Route tables
//!
//! Split into read and write routers so the server can rate limit only the
//! routes that publish content or call the language model.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;

use crate::domain::ports::{ContentClassifier, PostRepository, TextGenerator};
use crate::handlers;
use crate::AppState;

/// Browsing routes
pub fn read_routes<R, C, G>() -> Router<AppState<R, C, G>>
where
    R: PostRepository + 'static,
    C: ContentClassifier + 'static,
    G: TextGenerator + 'static,
{
    Router::new()
        .route("/posts", get(handlers::list_posts::<R, C, G>))
        .route("/posts/:id", get(handlers::get_post::<R, C, G>))
        .route(
            "/posts/:id/feedback-summary",
            get(handlers::feedback_summary::<R, C, G>),
        )
        .route("/tags", get(handlers::list_tags::<R, C, G>))
        .route("/dashboard", get(handlers::dashboard::<R, C, G>))
}

/// Moderated submissions, ratings and writing assistance
pub fn write_routes<R, C, G>() -> Router<AppState<R, C, G>>
where
    R: PostRepository + 'static,
    C: ContentClassifier + 'static,
    G: TextGenerator + 'static,
{
    Router::new()
        .route("/posts", post(handlers::create_post::<R, C, G>))
        .route("/posts/:id/comments", post(handlers::add_comment::<R, C, G>))
        .route(
            "/posts/:id/comments/ai",
            post(handlers::add_ai_comment::<R, C, G>),
        )
        .route(
            "/posts/:id/comments/:comment_id/rating",
            post(handlers::rate_comment::<R, C, G>),
        )
        .route("/assist/draft", post(handlers::draft_post::<R, C, G>))
        .route("/assist/tags", post(handlers::suggest_tags::<R, C, G>))
}

/// Apply per-client rate limiting: 2 req/sec sustained, burst of 5.
///
/// Uses PeerIpKeyExtractor to get client IP from socket connection
/// (SmartIpKeyExtractor requires X-Forwarded-For headers from reverse proxy),
/// so the server must be started with connect info.
pub fn rate_limited<S>(router: Router<S>) -> anyhow::Result<Router<S>>
where
    S: Clone + Send + Sync + 'static,
{
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .context("Failed to build governor config")?,
    );

    Ok(router.layer(GovernorLayer {
        config: governor_config,
    }))
}
