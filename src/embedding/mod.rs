//! Text embeddings for chunk retrieval
//!
//! Two backends are available:
//! - **http**: any OpenAI-compatible `/v1/embeddings` endpoint (OpenAI, Azure
//!   OpenAI, LM Studio, vLLM, Ollama, text-embeddings-inference)
//! - **hash**: deterministic feature hashing over words and word pairs; needs
//!   no network and gives lexical-overlap similarity
//!
//! ```toml
//! [embedding]
//! backend = "http"
//! endpoint = "http://localhost:1234/v1/embeddings"
//! model = "nomic-embed-text-v1.5"
//! dimensions = 768
//! ```

pub mod backend;

pub use backend::{
    create_backend, normalize_embedding, EmbeddingBackend, EmbeddingError, EmbeddingResult,
    HashBackend, HttpBackend,
};
