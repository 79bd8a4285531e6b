//! Generation proxy: validate, augment, forward, translate.
//!
//! One call to `generate` performs at most one outbound request. Nothing is
//! retried and nothing is shared between calls beyond the backend handle.
use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::inference::client::ImageBackend;
use crate::models::{GeneratedImage, GenerationParameters, GenerationRequest, InferencePayload};
use crate::prompt::transformer::transform;

#[derive(Clone)]
pub struct GenerationProxy {
    backend: Arc<dyn ImageBackend>,
    parameters: GenerationParameters,
}

impl GenerationProxy {
    pub fn new(backend: Arc<dyn ImageBackend>) -> Self {
        GenerationProxy { backend, parameters: GenerationParameters::default() }
    }

    pub fn with_parameters(mut self, parameters: GenerationParameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn parameters(&self) -> &GenerationParameters {
        &self.parameters
    }

    /// Payload that `generate` would send for `prompt`.
    pub fn build_payload(&self, prompt: &str) -> InferencePayload {
        payload_for(prompt, self.parameters)
    }

    pub async fn generate(&self, request: GenerationRequest) -> AppResult<GeneratedImage> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("generate", %request_id);
        async move {
            let prompt = validate(&request)?;
            let payload = self.build_payload(prompt);
            tracing::debug!(inputs = %payload.inputs, "Augmented prompt");

            let bytes = self.backend.generate_image(&payload).await?;
            Ok(GeneratedImage::png(bytes))
        }
        .instrument(span)
        .await
    }
}

pub fn payload_for(prompt: &str, parameters: GenerationParameters) -> InferencePayload {
    InferencePayload { inputs: transform(prompt), parameters }
}

/// Returns the prompt if it has any non-whitespace content.
pub fn validate(request: &GenerationRequest) -> AppResult<&str> {
    match request.prompt.as_deref() {
        Some(p) if !p.trim().is_empty() => Ok(p),
        _ => Err(AppError::MissingPrompt),
    }
}
