//! Axum request handlers for the HTTP API.
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::api::routes::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{GeneratedImage, GenerationRequest};

pub async fn root() -> &'static str {
    "Chibi Image Proxy"
}

/// `POST /api/generate-image`
///
/// A body that cannot be read as `{"prompt": string}` is a malformed caller
/// payload and is reported as an internal error; a missing or blank prompt is
/// a 400.
pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> AppResult<GeneratedImage> {
    let Json(request) = payload.map_err(|e| AppError::MalformedRequest(e.body_text()))?;
    state.proxy.generate(request).await
}
