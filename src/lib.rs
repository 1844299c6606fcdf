//! medrag: multilingual question answering over uploaded medical documents
//!
//! Upload a PDF, ask questions about it, and get answers in one of nineteen
//! languages:
//! - PDF and plain-text extraction (`pdf-extract`)
//! - Character-based chunking with overlap
//! - Pluggable embeddings (OpenAI-compatible HTTP or offline feature hashing)
//! - Exact cosine top-k retrieval over per-document stores with LRU eviction
//! - Answer generation via Gemini or OpenAI-compatible chat APIs
//! - Translation of answers via Google Translate
//! - axum HTTP API plus a terminal chat client

pub mod chat;
pub mod chunking;
pub mod client;
pub mod config;
pub mod content;
pub mod embedding;
pub mod generation;
pub mod index;
pub mod languages;
pub mod rag;
pub mod server;
pub mod translation;
pub mod types;
pub mod util;

pub use config::Config;
pub use rag::{Answer, Ingested, RagError, RagService};
pub use types::*;
