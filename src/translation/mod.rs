//! Answer translation
//!
//! Answers are generated in English and translated into the requested
//! language afterwards. English targets never reach a backend.

mod google;

pub use google::GoogleTranslator;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::config::{TranslationConfig, TranslationProvider};
use crate::languages::DEFAULT_LANGUAGE;

/// Errors that can occur while translating
#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    /// The translation service rejected the request
    #[error("Translation error: {0}")]
    Failed(String),

    /// The service answered with something we could not read
    #[error("Translation error: unexpected response: {0}")]
    InvalidResponse(String),

    #[error("Translation error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Translation configuration error: {0}")]
    Config(String),
}

pub type TranslationResult<T> = Result<T, TranslationError>;

/// Translates text into a target language code
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` (source language auto-detected) into `target`
    async fn translate(&self, text: &str, target: &str) -> TranslationResult<String>;

    fn name(&self) -> &str;
}

/// Returns text unchanged; used when no translation service is available
#[derive(Debug, Default, Clone)]
pub struct PassthroughTranslator;

#[async_trait]
impl Translator for PassthroughTranslator {
    async fn translate(&self, text: &str, _target: &str) -> TranslationResult<String> {
        Ok(text.to_string())
    }

    fn name(&self) -> &str {
        "passthrough"
    }
}

/// Translate unless the target is the default language
pub async fn translate_answer(
    translator: &dyn Translator,
    text: &str,
    target: &str,
) -> TranslationResult<String> {
    if target == DEFAULT_LANGUAGE {
        return Ok(text.to_string());
    }
    translator.translate(text, target).await
}

/// Create a translator from configuration
pub fn create_translator(config: &TranslationConfig) -> TranslationResult<Arc<dyn Translator>> {
    match config.provider {
        TranslationProvider::Google => Ok(Arc::new(GoogleTranslator::new(config)?)),
        TranslationProvider::Passthrough => {
            info!("Translation disabled, answers are returned in English");
            Ok(Arc::new(PassthroughTranslator))
        }
    }
}
