//! Chibi image proxy library
//!
//! Modules:
//! - `api`: Axum HTTP handlers and router setup used by the binary.
//! - `inference`: Client for the remote text-to-image inference endpoint.
//! - `prompt`: Style-suffix prompt transformation.
//! - `proxy`: Validate, augment, forward, translate.
//! - `models`: Request/payload/result types shared across modules.
//! - `config`: Env-driven configuration loader.
//! - `error`: Common error type and alias.
//!
//! Re-exports are provided for common types: `Config`, `InferenceClient`,
//! `GenerationProxy`, and `transform`.
pub mod api;
pub mod inference;
pub mod prompt;
pub mod proxy;
pub mod models;
pub mod config;
pub mod error;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use inference::client::{ImageBackend, InferenceClient};
pub use prompt::transformer::transform;
pub use proxy::generator::GenerationProxy;
