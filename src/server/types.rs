//! HTTP API request and response bodies

use serde::{Deserialize, Serialize};

use crate::languages::DEFAULT_LANGUAGE;
use crate::rag::{Answer, Ingested, RagError};

/// Message returned with every successful upload
pub const UPLOAD_SUCCESS_MESSAGE: &str = "File processed successfully.";

/// `POST /upload` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub document_id: String,
    pub filename: String,
    /// Heading detected in the extracted text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub message: String,
}

impl From<Ingested> for UploadResponse {
    fn from(ingested: Ingested) -> Self {
        Self {
            document_id: ingested.document_id,
            filename: ingested.filename.unwrap_or_default(),
            title: ingested.title,
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
        }
    }
}

/// `POST /query` request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub document_id: String,
    pub question: String,
    /// Language name or code (default: English)
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// `POST /query` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub response: String,
    /// Resolved language code
    pub language: String,
}

impl From<Answer> for QueryResponse {
    fn from(answer: Answer) -> Self {
        Self {
            response: answer.response,
            language: answer.language,
        }
    }
}

/// `GET /health` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// One entry of the `GET /` endpoint listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

/// `GET /` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiInfo {
    pub api: String,
    pub version: String,
    pub endpoints: Vec<EndpointInfo>,
}

impl ApiInfo {
    pub fn current() -> Self {
        let endpoints = [
            ("/", "GET", "This information"),
            ("/health", "GET", "Health check endpoint"),
            ("/languages", "GET", "Get supported languages"),
            ("/upload", "POST", "Upload a PDF document for processing"),
            ("/query", "POST", "Process medical context and answer questions"),
        ]
        .into_iter()
        .map(|(path, method, description)| EndpointInfo {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        })
        .collect();

        Self {
            api: "MultiLingual Medical RAG".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            endpoints,
        }
    }
}

/// Error body; `detail` is what clients display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    /// Stable machine-readable error code
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", detail)
    }

    pub fn unauthorized() -> Self {
        Self::new("UNAUTHORIZED", "Invalid or missing API key")
    }

    pub fn payload_too_large(limit: usize) -> Self {
        Self::new(
            "PAYLOAD_TOO_LARGE",
            format!("File too large. Maximum size is {} bytes.", limit),
        )
    }
}

impl From<&RagError> for ErrorResponse {
    fn from(err: &RagError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}
