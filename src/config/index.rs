//! Chunking, retrieval, and document store configuration

use serde::{Deserialize, Serialize};

/// Chunking configuration
///
/// Lengths are measured in characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Separator the text is first split on
    pub separator: String,
    /// Target maximum chunk length
    pub chunk_size: usize,
    /// Characters carried over from the end of one chunk into the next
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            separator: "\n".to_string(),
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Number of chunks placed in the prompt context
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 4 }
    }
}

/// In-memory document store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Documents kept before the least recently used one is evicted
    pub max_documents: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { max_documents: 256 }
    }
}
