//! Error taxonomy for the proxy and its HTTP rendering.
//!
//! Three families reach the caller: validation (400), upstream (the remote
//! status, 502 or 504) and internal (500). The caller only ever sees a short
//! public message; upstream bodies and internal causes go to the log.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub const MSG_MISSING_PROMPT: &str = "Prompt is required";
pub const MSG_UPSTREAM_FAILED: &str = "Failed to generate image";
pub const MSG_UPSTREAM_TIMEOUT: &str = "Image generation timed out";
pub const MSG_INTERNAL: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Prompt is required")]
    MissingPrompt,

    #[error("Inference endpoint returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Inference transport error: {0}")]
    UpstreamTransport(#[source] reqwest::Error),

    #[error("Inference request timed out")]
    UpstreamTimeout,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::UpstreamTimeout
        } else {
            AppError::UpstreamTransport(err)
        }
    }
}

impl AppError {
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AppError::Upstream { .. } | AppError::UpstreamTransport(_) | AppError::UpstreamTimeout
        )
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingPrompt => StatusCode::BAD_REQUEST,
            AppError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::UpstreamTransport(_) => StatusCode::BAD_GATEWAY,
            AppError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::Serialization(_)
            | AppError::MalformedRequest(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand back to the caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::MissingPrompt => MSG_MISSING_PROMPT,
            AppError::UpstreamTimeout => MSG_UPSTREAM_TIMEOUT,
            AppError::Upstream { .. } | AppError::UpstreamTransport(_) => MSG_UPSTREAM_FAILED,
            _ => MSG_INTERNAL,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            AppError::MissingPrompt => tracing::debug!("Rejected request: {}", self),
            e if e.is_upstream() => tracing::error!("Inference API error: {}", e),
            e => tracing::error!("Error in generate-image API: {}", e),
        }
        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
