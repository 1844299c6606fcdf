//! Document ingestion and question answering

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::RagError;
use crate::chunking::CharacterSplitter;
use crate::config::Config;
use crate::content::{extract_from_bytes, ContentType};
use crate::embedding::{create_backend, EmbeddingBackend};
use crate::generation::{build_prompt, create_generator, Generator};
use crate::index::{DocumentEntry, DocumentStore, VectorStore};
use crate::languages::{self, Language};
use crate::translation::{create_translator, translate_answer, Translator};
use crate::types::{Document, DocumentId};

/// Separator placed between retrieved chunks in the prompt context
const CONTEXT_SEPARATOR: &str = "\n\n";

/// Result of a successful upload
#[derive(Debug, Clone, Serialize)]
pub struct Ingested {
    pub document_id: DocumentId,
    pub filename: Option<String>,
    pub title: Option<String>,
    pub chunks: usize,
}

/// An answer in the resolved language
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub response: String,
    pub language: String,
}

/// Ingests documents into per-document vector stores and answers questions
/// against them.
pub struct RagService {
    embedder: Arc<dyn EmbeddingBackend>,
    generator: Arc<dyn Generator>,
    translator: Arc<dyn Translator>,
    splitter: CharacterSplitter,
    documents: DocumentStore,
    top_k: usize,
    max_question_bytes: usize,
}

impl RagService {
    /// Build the service and its backends from configuration
    pub fn new(config: &Config) -> Result<Self, RagError> {
        let embedder = create_backend(&config.embedding)?;
        let generator = create_generator(&config.generation)?;
        let translator = create_translator(&config.translation)?;
        Ok(Self::with_backends(config, embedder, generator, translator))
    }

    /// Build the service around already-constructed backends
    pub fn with_backends(
        config: &Config,
        embedder: Arc<dyn EmbeddingBackend>,
        generator: Arc<dyn Generator>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        info!(
            "RAG service ready: embedder={} ({} dims), model={}, translator={}, top_k={}",
            embedder.name(),
            embedder.dimensions(),
            generator.model(),
            translator.name(),
            config.retrieval.top_k
        );
        Self {
            embedder,
            generator,
            translator,
            splitter: CharacterSplitter::new(config.chunking.clone()),
            documents: DocumentStore::new(config.store.max_documents),
            top_k: config.retrieval.top_k.max(1),
            max_question_bytes: config.server.max_question_bytes,
        }
    }

    /// Extract, chunk and embed an uploaded file, registering it under a
    /// fresh document id.
    pub async fn ingest(
        &self,
        bytes: Vec<u8>,
        filename: Option<String>,
        mime: Option<String>,
    ) -> Result<Ingested, RagError> {
        let start = Instant::now();

        let content_type = ContentType::detect(mime.as_deref(), filename.as_deref(), &bytes);
        debug!("Detected content type {:?}", content_type);

        // pdf-extract is CPU bound and synchronous
        let extracted = tokio::task::spawn_blocking(move || extract_from_bytes(&bytes, content_type))
            .await
            .map_err(|e| RagError::Internal(format!("extraction task failed: {}", e)))??;

        let mut document = Document::new(extracted.content);
        if let Some(name) = &filename {
            document = document.with_filename(name.clone());
        }
        if let Some(title) = &extracted.title {
            document = document.with_title(title.clone());
        }

        let chunks = self.splitter.split_document(&document);
        if chunks.is_empty() {
            return Err(RagError::NoText);
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        let store = VectorStore::from_parts(self.embedder.dimensions(), chunks, embeddings)?;
        let chunk_count = store.len();

        let entry = DocumentEntry::new(document.id.clone(), store)
            .with_filename(document.filename.clone())
            .with_title(document.title.clone());
        self.documents.insert(entry);

        info!(
            "Ingested document {} {:?} ({} chunks) in {:?}",
            document.id,
            document.title.as_deref().unwrap_or("untitled"),
            chunk_count,
            start.elapsed()
        );

        Ok(Ingested {
            document_id: document.id,
            filename,
            title: document.title,
            chunks: chunk_count,
        })
    }

    /// Answer a question about an ingested document.
    ///
    /// The language may be a catalogue name or code; anything unknown
    /// answers in English. The returned `language` is the resolved code.
    pub async fn answer(
        &self,
        document_id: &str,
        question: &str,
        language: &str,
    ) -> Result<Answer, RagError> {
        let start = Instant::now();
        let target = languages::resolve(language);
        let question = self.validate_question(question)?;

        let entry = self
            .documents
            .get(document_id)
            .ok_or(RagError::DocumentNotFound)?;

        let query_embedding = self.embedder.embed(question).await?;
        let hits = entry.store.search(&query_embedding, self.top_k)?;
        debug!(
            "Retrieved {} chunks for document {} (best score {:.3})",
            hits.len(),
            document_id,
            hits.first().map(|h| h.score).unwrap_or(0.0)
        );

        let context = hits
            .iter()
            .map(|h| h.chunk.content.as_str())
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR);
        let prompt = build_prompt(&context, question);

        let response = self.generator.generate(&prompt).await?;
        let response = translate_answer(self.translator.as_ref(), &response, target.code).await?;

        info!(
            "Answered question on {} in {} ({:?})",
            document_id,
            target.code,
            start.elapsed()
        );

        Ok(Answer {
            response,
            language: target.code.to_string(),
        })
    }

    /// Supported answer languages
    pub fn languages(&self) -> &'static [Language] {
        languages::LANGUAGES
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    fn validate_question<'a>(&self, question: &'a str) -> Result<&'a str, RagError> {
        let trimmed = question.trim();
        if trimmed.is_empty() {
            return Err(RagError::InvalidQuestion(
                "Question must not be empty.".to_string(),
            ));
        }
        if question.len() > self.max_question_bytes {
            warn!(
                "Rejected question of {} bytes (limit {})",
                question.len(),
                self.max_question_bytes
            );
            return Err(RagError::InvalidQuestion(format!(
                "Question is too long (limit {} bytes).",
                self.max_question_bytes
            )));
        }
        Ok(trimmed)
    }
}
