//! In-memory vector storage
//!
//! Features:
//! - Exact cosine top-k search over one document's chunks
//! - Registry of ingested documents keyed by document id
//! - Least-recently-used eviction once the registry is full

mod registry;
mod vector;

pub use registry::*;
pub use vector::*;

/// Errors raised by the vector store
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("Expected {expected} dimensions, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("{chunks} chunks but {embeddings} embeddings")]
    LengthMismatch { chunks: usize, embeddings: usize },
}
