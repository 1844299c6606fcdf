//! Retrieval-augmented answering over uploaded documents
//!
//! Upload: extract text → split into overlapping chunks → embed → register a
//! per-document vector store under a new id.
//!
//! Query: resolve language → find the document → embed the question → top-k
//! chunks → prompt → generate in English → translate when needed.

mod error;
mod service;

pub use error::RagError;
pub use service::{Answer, Ingested, RagService};
