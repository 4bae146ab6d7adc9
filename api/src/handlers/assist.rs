//! Writing assistance handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{ContentClassifier, PostRepository, TextGenerator};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub generated_post_text: String,
}

#[derive(Debug, Deserialize)]
pub struct SuggestTagsRequest {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestTagsResponse {
    pub tags: Vec<String>,
}

/// POST /assist/draft
pub async fn draft_post<R, C, G>(
    State(state): State<AppState<R, C, G>>,
    Json(request): Json<DraftRequest>,
) -> Result<Json<DraftResponse>, AppError>
where
    R: PostRepository + 'static,
    C: ContentClassifier + 'static,
    G: TextGenerator + 'static,
{
    let generated_post_text = state.assist.draft_post(&request.description).await?;
    Ok(Json(DraftResponse {
        generated_post_text,
    }))
}

/// POST /assist/tags
pub async fn suggest_tags<R, C, G>(
    State(state): State<AppState<R, C, G>>,
    Json(request): Json<SuggestTagsRequest>,
) -> Result<Json<SuggestTagsResponse>, AppError>
where
    R: PostRepository + 'static,
    C: ContentClassifier + 'static,
    G: TextGenerator + 'static,
{
    let tags = state.assist.suggest_tags(&request.content).await?;
    Ok(Json(SuggestTagsResponse { tags }))
}
