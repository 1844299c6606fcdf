//! Backend factory for creating embedding backends from configuration

use std::sync::Arc;
use tracing::{info, warn};

use super::hash::HashBackend;
use super::http::HttpBackend;
use super::traits::{EmbeddingBackend, EmbeddingResult};
use crate::config::{EmbeddingBackendKind, EmbeddingConfig};

/// Create an embedding backend from configuration
///
/// Returns an `Arc<dyn EmbeddingBackend>` that can be shared across tasks.
pub fn create_backend(config: &EmbeddingConfig) -> EmbeddingResult<Arc<dyn EmbeddingBackend>> {
    match config.backend {
        EmbeddingBackendKind::Http => {
            let backend = HttpBackend::new(config)?;
            Ok(Arc::new(backend))
        }
        EmbeddingBackendKind::Hash => {
            warn!(
                "Using offline hash embeddings ({} dimensions); retrieval matches on shared words only",
                config.dimensions
            );
            info!("Creating hash embedding backend");
            Ok(Arc::new(HashBackend::new(config.dimensions)))
        }
    }
}
