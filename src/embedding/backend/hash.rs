//! Offline embedding backend using feature hashing
//!
//! Words and adjacent word pairs are hashed with xxh3 into a fixed number of
//! signed buckets. Texts sharing vocabulary end up close under cosine
//! similarity, which is enough for single-document retrieval when no
//! embedding service is configured. There is no semantic generalization.

use async_trait::async_trait;

use super::traits::{normalize_embedding, EmbeddingBackend, EmbeddingResult};
use crate::chunking::SimpleTokenizer;
use crate::types::Embedding;

/// Weight of a word-pair feature relative to a single word
const BIGRAM_WEIGHT: f32 = 0.5;

/// Deterministic feature-hashing backend
#[derive(Debug, Clone)]
pub struct HashBackend {
    dimensions: usize,
}

impl HashBackend {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// Embed synchronously; the async trait methods delegate here
    pub fn embed_sync(&self, text: &str) -> Embedding {
        let mut vector = vec![0.0f32; self.dimensions];
        let tokens = SimpleTokenizer::normalized_tokens(text);

        for token in &tokens {
            self.add_feature(&mut vector, token, 1.0);
        }
        for bigram in SimpleTokenizer::bigrams(&tokens) {
            self.add_feature(&mut vector, &bigram, BIGRAM_WEIGHT);
        }

        normalize_embedding(&vector)
    }

    fn add_feature(&self, vector: &mut [f32], feature: &str, weight: f32) {
        let hash = xxhash_rust::xxh3::xxh3_64(feature.as_bytes());
        let bucket = (hash % self.dimensions as u64) as usize;
        let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
        vector[bucket] += sign * weight;
    }
}

#[async_trait]
impl EmbeddingBackend for HashBackend {
    async fn embed(&self, text: &str) -> EmbeddingResult<Embedding> {
        Ok(self.embed_sync(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> EmbeddingResult<Vec<Embedding>> {
        Ok(texts.iter().map(|t| self.embed_sync(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hash"
    }
}
