//! Answer generation with a hosted LLM
//!
//! The retrieved chunks and the user's question are rendered into a single
//! medical-assistant prompt and sent to the configured provider.
//!
//! ```toml
//! [generation]
//! provider = "gemini"            # or "openai"
//! model = "gemini-2.0-flash-lite"
//! # api_key falls back to GOOGLE_API_KEY / OPENAI_API_KEY
//! ```

mod gemini;
mod openai;
mod prompt;

pub use gemini::GeminiGenerator;
pub use openai::OpenAiGenerator;
pub use prompt::build_prompt;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::config::{GenerationConfig, GenerationProvider, GOOGLE_API_KEY_ENV, OPENAI_API_KEY_ENV};

/// Errors from the generation provider
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The provider returned an error response
    #[error("Error generating response: {0}")]
    Failed(String),

    #[error("Error generating response: rate limited")]
    RateLimited,

    /// The provider answered without any text (e.g. blocked by a safety filter)
    #[error("Error generating response: no text in response ({0})")]
    EmptyResponse(String),

    #[error("Error generating response: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Generation configuration error: {0}")]
    Config(String),
}

pub type GenerationResult<T> = Result<T, GenerationError>;

/// A text generation backend
#[async_trait]
pub trait Generator: Send + Sync {
    /// Produce a completion for `prompt`
    async fn generate(&self, prompt: &str) -> GenerationResult<String>;

    /// Model identifier, for logging
    fn model(&self) -> &str;
}

/// Create a generator from configuration.
///
/// Fails when the provider needs an API key and none is configured or set
/// in the environment.
pub fn create_generator(config: &GenerationConfig) -> GenerationResult<Arc<dyn Generator>> {
    let api_key = config.resolve_api_key();
    info!(
        "Creating {:?} generator: model={}, base_url={}",
        config.provider,
        config.model,
        config.base_url()
    );

    match config.provider {
        GenerationProvider::Gemini => {
            let key = api_key.ok_or_else(|| {
                GenerationError::Config(format!(
                    "Gemini needs an API key: set generation.api_key or {}",
                    GOOGLE_API_KEY_ENV
                ))
            })?;
            Ok(Arc::new(GeminiGenerator::new(config, key)?))
        }
        GenerationProvider::OpenAi => {
            // Local OpenAI-compatible servers usually run without a key
            if api_key.is_none() && config.endpoint.is_none() {
                return Err(GenerationError::Config(format!(
                    "OpenAI needs an API key: set generation.api_key or {}",
                    OPENAI_API_KEY_ENV
                )));
            }
            Ok(Arc::new(OpenAiGenerator::new(config, api_key)?))
        }
    }
}
