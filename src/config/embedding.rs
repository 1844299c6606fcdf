//! Embedding backend configuration

use serde::{Deserialize, Serialize};

/// Which embedding backend to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackendKind {
    /// OpenAI-compatible HTTP endpoint
    Http,
    /// Deterministic feature hashing, no network
    Hash,
}

/// Embedding configuration
///
/// ```toml
/// [embedding]
/// backend = "http"
/// endpoint = "https://api.openai.com/v1/embeddings"
/// model = "text-embedding-3-small"
/// dimensions = 1536
/// ```
///
/// Works with OpenAI, Azure OpenAI, LM Studio, vLLM, Ollama (OpenAI compat
/// mode) and text-embeddings-inference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub backend: EmbeddingBackendKind,
    /// HTTP backend: API endpoint URL
    pub endpoint: Option<String>,
    /// HTTP backend: API key (falls back to OPENAI_API_KEY)
    pub api_key: Option<String>,
    /// HTTP backend: model name
    pub model: String,
    /// Embedding dimensions
    pub dimensions: usize,
    /// HTTP backend: request timeout in seconds
    pub timeout_secs: u64,
    /// HTTP backend: maximum texts per request
    pub max_batch_size: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackendKind::Hash,
            endpoint: None,
            api_key: None,
            model: "text-embedding-3-small".to_string(),
            dimensions: 384,
            timeout_secs: 30,
            max_batch_size: 100,
        }
    }
}
