//! Exact cosine similarity search over a document's chunks

use std::cmp::Ordering;

use super::IndexError;
use crate::embedding::normalize_embedding;
use crate::types::{Chunk, Embedding, ScoredChunk};

/// Chunks of one document with their (unit-length) embeddings
#[derive(Debug, Clone)]
pub struct VectorStore {
    dimensions: usize,
    chunks: Vec<Chunk>,
    embeddings: Vec<Embedding>,
}

impl VectorStore {
    /// Create an empty store for vectors of `dimensions` length
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            chunks: Vec::new(),
            embeddings: Vec::new(),
        }
    }

    /// Build a store from parallel chunk and embedding lists
    pub fn from_parts(
        dimensions: usize,
        chunks: Vec<Chunk>,
        embeddings: Vec<Embedding>,
    ) -> Result<Self, IndexError> {
        if chunks.len() != embeddings.len() {
            return Err(IndexError::LengthMismatch {
                chunks: chunks.len(),
                embeddings: embeddings.len(),
            });
        }
        let mut store = Self::new(dimensions);
        for (chunk, embedding) in chunks.into_iter().zip(embeddings) {
            store.add(chunk, embedding)?;
        }
        Ok(store)
    }

    /// Add a chunk; the embedding is normalized on insert
    pub fn add(&mut self, chunk: Chunk, embedding: Embedding) -> Result<(), IndexError> {
        self.check_dimensions(&embedding)?;
        self.chunks.push(chunk);
        self.embeddings.push(normalize_embedding(&embedding));
        Ok(())
    }

    /// Top `k` chunks by cosine similarity, best first.
    ///
    /// Equal scores keep document order. Asking for more than the store
    /// holds returns every chunk.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>, IndexError> {
        self.check_dimensions(query)?;
        let query = normalize_embedding(query);

        let mut scored: Vec<(usize, f32)> = self
            .embeddings
            .iter()
            .enumerate()
            .map(|(i, e)| (i, dot(&query, e)))
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(i, score)| ScoredChunk {
                chunk: self.chunks[i].clone(),
                score,
            })
            .collect())
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn check_dimensions(&self, vector: &[f32]) -> Result<(), IndexError> {
        if vector.len() != self.dimensions {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            });
        }
        Ok(())
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
