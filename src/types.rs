//! Core types shared across the ingestion and query pipeline

use serde::{Deserialize, Serialize};

/// Opaque identifier handed out after a document is ingested
pub type DocumentId = String;

/// Identifier of a chunk within a document (`<document_id>_<index>`)
pub type ChunkId = String;

/// Embedding vector type
pub type Embedding = Vec<f32>;

/// A contiguous slice of document text, the unit of retrieval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    pub document_id: DocumentId,
    /// Position of the chunk within the document
    pub index: usize,
    pub content: String,
}

impl Chunk {
    pub fn new(document_id: &str, index: usize, content: impl Into<String>) -> Self {
        Self {
            id: format!("{}_{}", document_id, index),
            document_id: document_id.to_string(),
            index,
            content: content.into(),
        }
    }
}

/// Extracted text of an uploaded document, before chunking
#[derive(Debug, Clone)]
pub struct Document {
    pub id: DocumentId,
    pub content: String,
    pub filename: Option<String>,
    pub title: Option<String>,
}

impl Document {
    /// Create a document with a fresh UUID v4 identifier
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            filename: None,
            title: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// A chunk returned by similarity search
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    /// Cosine similarity to the query (-1.0 to 1.0)
    pub score: f32,
}
