//! Answer generation and translation configuration

use serde::{Deserialize, Serialize};

/// Environment variable consulted for the Gemini API key
pub const GOOGLE_API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Environment variable consulted for OpenAI-compatible API keys
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// LLM provider used to answer questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationProvider {
    /// Google Gemini `generateContent` API
    Gemini,
    /// OpenAI-compatible `/chat/completions`
    OpenAi,
}

/// Answer generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub provider: GenerationProvider,
    /// Provider model id
    pub model: String,
    /// Base URL override (provider default when unset)
    pub endpoint: Option<String>,
    /// API key (falls back to the provider's environment variable)
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Sampling temperature (provider default when unset)
    pub temperature: Option<f32>,
}

impl GenerationConfig {
    /// Base URL for the configured provider
    pub fn base_url(&self) -> String {
        if let Some(endpoint) = &self.endpoint {
            return endpoint.trim_end_matches('/').to_string();
        }
        match self.provider {
            GenerationProvider::Gemini => {
                "https://generativelanguage.googleapis.com/v1beta".to_string()
            }
            GenerationProvider::OpenAi => "https://api.openai.com/v1".to_string(),
        }
    }

    /// API key from config, then from the provider's environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        let env_var = match self.provider {
            GenerationProvider::Gemini => GOOGLE_API_KEY_ENV,
            GenerationProvider::OpenAi => OPENAI_API_KEY_ENV,
        };
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(env_var).ok().filter(|k| !k.is_empty()))
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: GenerationProvider::Gemini,
            model: "gemini-2.0-flash-lite".to_string(),
            endpoint: None,
            api_key: None,
            timeout_secs: 60,
            temperature: None,
        }
    }
}

/// Translation backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    /// Google Translate web endpoint (auto-detected source language)
    Google,
    /// Return answers untranslated
    Passthrough,
}

/// Translation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub provider: TranslationProvider,
    /// Translate endpoint URL
    pub endpoint: String,
    /// Longest piece sent in a single translate request, in characters
    pub max_chunk_chars: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::Google,
            endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
            max_chunk_chars: 4900,
            timeout_secs: 30,
        }
    }
}
