//! FeelFree API Server
//!
//! An anonymous mental-health support community where every post and comment
//! passes a moderation gate before it is published.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Json, Router};
use sea_orm::Database;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;
mod routes;

#[cfg(test)]
mod test_utils;


use adapters::{InMemoryPostRepository, OpenAiClient, PostgresPostRepository};
use app::{AssistService, FeedService, ModerationGate, SubmissionService};
use config::Config;
use domain::ports::{ContentClassifier, PostRepository, TextGenerator};

/// Application state shared across all handlers
pub struct AppState<R, C, G>
where
    R: PostRepository,
    C: ContentClassifier,
    G: TextGenerator,
{
    pub submissions: Arc<SubmissionService<R, C>>,
    pub feed: Arc<FeedService<R>>,
    pub assist: Arc<AssistService<R, G>>,
}

impl<R, C, G> Clone for AppState<R, C, G>
where
    R: PostRepository,
    C: ContentClassifier,
    G: TextGenerator,
{
    fn clone(&self) -> Self {
        Self {
            submissions: self.submissions.clone(),
            feed: self.feed.clone(),
            assist: self.assist.clone(),
        }
    }
}

impl<R, C, G> AppState<R, C, G>
where
    R: PostRepository,
    C: ContentClassifier,
    G: TextGenerator,
{
    pub fn new(posts: Arc<R>, gate: ModerationGate<C>, assist: AssistService<R, G>) -> Self {
        Self {
            submissions: Arc::new(SubmissionService::new(posts.clone(), gate)),
            feed: Arc::new(FeedService::new(posts)),
            assist: Arc::new(assist),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,feelfree_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting FeelFree API...");

    // Load configuration
    let config = Config::from_env();

    match config.database_url.clone() {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let db = Database::connect(&url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Database connected");

            serve(config, Arc::new(PostgresPostRepository::new(db))).await
        }
        None => {
            let repo = if config.seed_sample_posts {
                InMemoryPostRepository::with_sample_posts()
            } else {
                InMemoryPostRepository::new()
            };
            tracing::info!(
                seeded = config.seed_sample_posts,
                "DATABASE_URL not set, using in-memory post store"
            );

            serve(config, Arc::new(repo)).await
        }
    }
}

async fn serve<R>(config: Config, posts: Arc<R>) -> anyhow::Result<()>
where
    R: PostRepository + 'static,
{
    if !config.ai_enabled() {
        tracing::warn!(
            "AI_API_KEY not set: submissions long enough to need moderation will be refused"
        );
    }

    // One client serves both moderation and generation
    let ai_client = Arc::new(
        OpenAiClient::new(
            config.ai_api_url.clone(),
            config.ai_api_key.clone(),
            config.ai_model.clone(),
            config.generation_timeout,
        )
        .context("Failed to build AI client")?,
    );

    let gate = ModerationGate::new(ai_client.clone(), config.moderation_timeout);
    let assist = AssistService::new(posts.clone(), ai_client, config.generation_timeout);
    let state = AppState::new(posts, gate, assist);

    // Rate-limited routes (submissions and model calls)
    let rate_limited_routes = routes::rate_limited(routes::write_routes())?;

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .merge(routes::read_routes())
        .merge(rate_limited_routes)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
