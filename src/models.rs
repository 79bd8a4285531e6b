//! Request-scoped data passed between the API, the proxy and the client.
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

pub const PNG_CONTENT_TYPE: &str = "image/png";
pub const NO_CACHE: &str = "no-cache";

/// Inbound body of `POST /api/generate-image`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerationRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        GenerationRequest { prompt: Some(prompt.into()) }
    }
}

/// Sampling knobs sent with every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub guidance_scale: f64,
    pub num_inference_steps: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        GenerationParameters {
            guidance_scale: 7.5,
            num_inference_steps: 50,
            width: 512,
            height: 512,
        }
    }
}

/// Outbound body for the inference endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferencePayload {
    pub inputs: String,
    pub parameters: GenerationParameters,
}

/// Image bytes as returned by the remote model.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

impl GeneratedImage {
    pub fn png(bytes: Vec<u8>) -> Self {
        GeneratedImage { bytes, content_type: PNG_CONTENT_TYPE }
    }
}

impl IntoResponse for GeneratedImage {
    fn into_response(self) -> Response {
        (
            [
                (header::CONTENT_TYPE, self.content_type),
                (header::CACHE_CONTROL, NO_CACHE),
            ],
            self.bytes,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn payload_serializes_to_inference_shape() {
        let payload = InferencePayload {
            inputs: "cat".into(),
            parameters: GenerationParameters::default(),
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "inputs": "cat",
                "parameters": {
                    "guidance_scale": 7.5,
                    "num_inference_steps": 50,
                    "width": 512,
                    "height": 512
                }
            })
        );
    }

    #[test]
    fn request_tolerates_missing_prompt_and_extra_fields() {
        let req: GenerationRequest = serde_json::from_str(r#"{"style":"x"}"#).unwrap();
        assert!(req.prompt.is_none());
        let req: GenerationRequest = serde_json::from_str(r#"{"prompt":null}"#).unwrap();
        assert!(req.prompt.is_none());
    }

    #[test]
    fn request_rejects_non_string_prompt() {
        assert!(serde_json::from_str::<GenerationRequest>(r#"{"prompt":42}"#).is_err());
    }

    #[test]
    fn image_response_sets_png_and_no_cache() {
        let resp = GeneratedImage::png(vec![1, 2, 3]).into_response();
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/png");
        assert_eq!(resp.headers()[header::CACHE_CONTROL], "no-cache");
    }
}
