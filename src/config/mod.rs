//! Configuration for medrag

mod embedding;
mod generation;
mod index;
mod logging;
mod server;

pub use embedding::{EmbeddingBackendKind, EmbeddingConfig};
pub use generation::{
    GenerationConfig, GenerationProvider, TranslationConfig, TranslationProvider,
    GOOGLE_API_KEY_ENV, OPENAI_API_KEY_ENV,
};
pub use index::{ChunkingConfig, RetrievalConfig, StoreConfig};
pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use server::{ServerConfig, DEFAULT_MAX_UPLOAD_BYTES};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the medrag service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP API server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Text chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Embedding backend configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// Answer generation configuration
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Translation configuration
    #[serde(default)]
    pub translation: TranslationConfig,
    /// Document store configuration
    #[serde(default)]
    pub store: StoreConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate all configuration fields.
    ///
    /// Collects every validation error and reports them together.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        // Chunking
        if self.chunking.chunk_size == 0 {
            errors.push("chunk_size must be positive".to_string());
        }
        if self.chunking.chunk_overlap > self.chunking.chunk_size {
            errors.push(format!(
                "chunk_overlap ({}) must not exceed chunk_size ({})",
                self.chunking.chunk_overlap, self.chunking.chunk_size
            ));
        }
        if self.chunking.separator.is_empty() {
            errors.push("chunking separator must not be empty".to_string());
        }

        // Embedding
        if self.embedding.dimensions == 0 {
            errors.push("embedding dimensions must be positive".to_string());
        }
        if self.embedding.dimensions > 4096 {
            errors.push("embedding dimensions must be <= 4096".to_string());
        }
        if self.embedding.backend == EmbeddingBackendKind::Http {
            if self.embedding.endpoint.as_deref().unwrap_or("").is_empty() {
                errors.push("embedding endpoint is required for the http backend".to_string());
            }
            if self.embedding.max_batch_size == 0 {
                errors.push("embedding max_batch_size must be positive".to_string());
            }
        }

        // Retrieval
        if self.retrieval.top_k == 0 {
            errors.push("top_k must be positive".to_string());
        }

        // Generation
        if self.generation.model.trim().is_empty() {
            errors.push("generation model must not be empty".to_string());
        }
        if let Some(t) = self.generation.temperature {
            if !(0.0..=2.0).contains(&t) {
                errors.push("generation temperature must be between 0.0 and 2.0".to_string());
            }
        }

        // Translation
        if self.translation.max_chunk_chars == 0 {
            errors.push("translation max_chunk_chars must be positive".to_string());
        }

        // Store
        if self.store.max_documents == 0 {
            errors.push("max_documents must be positive".to_string());
        }

        // Server
        if self.server.max_upload_bytes == 0 {
            errors.push("max_upload_bytes must be positive".to_string());
        }
        if self.server.max_question_bytes == 0 {
            errors.push("max_question_bytes must be positive".to_string());
        }
        match self.server.listen_addr.rsplit_once(':') {
            Some((_, port_str)) => match port_str.parse::<u32>() {
                Ok(port) if port == 0 || port > 65535 => errors.push(format!(
                    "HTTP listen port must be between 1 and 65535, got {}",
                    port
                )),
                Ok(_) => {}
                Err(_) => errors.push(format!(
                    "HTTP listen address '{}' has an invalid port",
                    self.server.listen_addr
                )),
            },
            None => errors.push(format!(
                "HTTP listen address '{}' must be host:port",
                self.server.listen_addr
            )),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }
    }
}
