//! Unified error types for the FeelFree API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic and persistence errors
//! - `AiError`: Language model client errors
//! - `ModerationError`: Failures of the moderation gate itself
//! - `AppError`: Application layer errors (wraps the others for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Shown to users whenever moderation could not run. Never the raw cause.
pub const MODERATION_UNAVAILABLE_MESSAGE: &str =
    "We could not process your submission right now. Please try again later.";

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Language model API client errors
#[derive(Debug, Error)]
pub enum AiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Unauthorized - invalid API key")]
    Unauthorized,

    #[error("Request timed out")]
    Timeout,

    #[error("Model returned no content")]
    EmptyResponse,

    #[error("Malformed model output: {0}")]
    Malformed(String),
}

/// Moderation gate errors
///
/// A rejected submission is not an error; only failing to reach a verdict is.
#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("Classification unavailable: {0}")]
    ClassificationUnavailable(String),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("AI error: {0}")]
    Ai(#[from] AiError),

    #[error("{0}")]
    Moderation(#[from] ModerationError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Domain(DomainError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "Not found", Some(msg.clone()))
            }
            AppError::Domain(DomainError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(msg.clone()),
            ),
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Domain(DomainError::Internal(msg)) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Ai(e) => {
                tracing::error!("AI error: {}", e);
                match e {
                    AiError::RateLimited => (
                        StatusCode::TOO_MANY_REQUESTS,
                        "Assistant is busy",
                        Some("Please try again in a moment.".to_string()),
                    ),
                    _ => (
                        StatusCode::BAD_GATEWAY,
                        "Assistant unavailable",
                        Some("Could not generate a response. Please try again.".to_string()),
                    ),
                }
            }
            AppError::Moderation(ModerationError::ClassificationUnavailable(cause)) => {
                tracing::warn!(cause = %cause, "Moderation unavailable, submission not published");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Submission not processed",
                    Some(MODERATION_UNAVAILABLE_MESSAGE.to_string()),
                )
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", Some(msg.clone())),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moderation_unavailable_maps_to_503() {
        let err = AppError::from(ModerationError::ClassificationUnavailable(
            "connection refused".to_string(),
        ));
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn validation_maps_to_400() {
        let err = AppError::from(DomainError::Validation("title is required".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn ai_failure_maps_to_bad_gateway() {
        let err = AppError::from(AiError::EmptyResponse);
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
