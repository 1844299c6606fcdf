//! HTTP client for the medrag API
//!
//! Used by the interactive `chat` command; any other Rust program can use it
//! to talk to a running server.

mod api;

pub use api::{validate_upload, ApiClient, MAX_CLIENT_UPLOAD_BYTES};

use thiserror::Error;

/// Errors that can occur when talking to the server
#[derive(Debug, Error)]
pub enum ClientError {
    /// The file failed local validation and was not sent
    #[error("Please upload a valid PDF file (max 10MB)")]
    InvalidFile,

    /// The server answered with a non-success status
    #[error("{detail}")]
    Api { status: u16, detail: String },

    #[error("Could not reach server: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// HTTP status for server-side errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
