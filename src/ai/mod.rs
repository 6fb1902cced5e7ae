/// Generative AI integration
///
/// This module handles:
/// - The content generator seam (a trait, so tests can stub the service)
/// - The Gemini HTTP client
/// - Similar-watch recommendations built on top of a generator

use async_trait::async_trait;
use thiserror::Error;

pub mod gemini;
pub mod recommend;

pub use gemini::GeminiClient;
pub use recommend::Recommender;

/// Failures talking to the generative service
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response contained no text")]
    EmptyResponse,

    #[error("request timed out")]
    TimedOut,
}

/// A service that answers a prompt with JSON constrained by a response schema
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_json(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<String, GenerationError>;
}
