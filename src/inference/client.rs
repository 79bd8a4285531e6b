//! Thin HTTP client for the remote text-to-image inference endpoint.
//!
//! - `generate_image` posts an `InferencePayload` with a bearer token and
//!   returns the raw image bytes on success.
//! - Non-success statuses become `AppError::Upstream` carrying the status; the
//!   body is kept for the operator log only and is never parsed as an image.
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};

use crate::error::{AppError, AppResult};
use crate::models::InferencePayload;

// Upstream error bodies can be whole HTML pages.
const MAX_ERROR_BODY_LEN: usize = 2048;

/// Anything that can turn an inference payload into image bytes.
#[async_trait]
pub trait ImageBackend: Send + Sync {
    async fn generate_image(&self, payload: &InferencePayload) -> AppResult<Vec<u8>>;
}

#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    model_url: String,
    api_token: String,
}

impl fmt::Debug for InferenceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceClient")
            .field("model_url", &self.model_url)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

impl InferenceClient {
    /// Build a client. `timeout` bounds the whole exchange; `None` waits for
    /// as long as the remote endpoint takes.
    pub fn new(model_url: String, api_token: String, timeout: Option<Duration>) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(InferenceClient {
            client,
            model_url: model_url.trim_end_matches('/').to_string(),
            api_token,
        })
    }

    pub fn model_url(&self) -> &str {
        &self.model_url
    }
}

#[async_trait]
impl ImageBackend for InferenceClient {
    async fn generate_image(&self, payload: &InferencePayload) -> AppResult<Vec<u8>> {
        tracing::info!("Sending inference request to {}", self.model_url);
        tracing::debug!("Inference parameters: {:?}", payload.parameters);

        let response = self
            .client
            .post(&self.model_url)
            .bearer_auth(&self.api_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(payload)?)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let bytes = response.bytes().await?;
            tracing::info!("Received image ({} bytes)", bytes.len());
            Ok(bytes.to_vec())
        } else {
            let mut body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            if body.len() > MAX_ERROR_BODY_LEN {
                let mut cut = MAX_ERROR_BODY_LEN;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            Err(AppError::Upstream { status: status.as_u16(), body })
        }
    }
}
