use axum::http::StatusCode;

use crate::content::ContentError;
use crate::embedding::EmbeddingError;
use crate::generation::GenerationError;
use crate::index::IndexError;
use crate::translation::TranslationError;

/// Errors from ingesting documents or answering questions
#[derive(Debug, thiserror::Error)]
pub enum RagError {
    /// Extraction produced no usable text
    #[error("Could not extract text from the PDF.")]
    NoText,

    /// Unknown or evicted document id
    #[error("Document not found. Please upload the document again.")]
    DocumentNotFound,

    #[error("{0}")]
    InvalidQuestion(String),

    #[error("{0}")]
    Content(ContentError),

    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ContentError> for RagError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::Empty => RagError::NoText,
            other => RagError::Content(other),
        }
    }
}

impl RagError {
    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            RagError::NoText | RagError::InvalidQuestion(_) => StatusCode::BAD_REQUEST,
            RagError::DocumentNotFound => StatusCode::NOT_FOUND,
            RagError::Content(ContentError::Unsupported(_)) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable tag
    pub fn code(&self) -> &'static str {
        match self {
            RagError::NoText => "NO_TEXT",
            RagError::DocumentNotFound => "DOCUMENT_NOT_FOUND",
            RagError::InvalidQuestion(_) => "INVALID_QUESTION",
            RagError::Content(ContentError::Unsupported(_)) => "UNSUPPORTED_CONTENT",
            RagError::Content(_) => "EXTRACTION_FAILED",
            RagError::Embedding(_) => "EMBEDDING_FAILED",
            RagError::Generation(_) => "GENERATION_FAILED",
            RagError::Translation(_) => "TRANSLATION_FAILED",
            RagError::Index(_) | RagError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the caller's input caused the error
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}
