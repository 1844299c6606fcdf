//! Pluggable embedding backend system

mod factory;
mod hash;
mod http;
mod traits;

pub use factory::create_backend;
pub use hash::HashBackend;
pub use http::HttpBackend;
pub use traits::{normalize_embedding, EmbeddingBackend, EmbeddingError, EmbeddingResult};
