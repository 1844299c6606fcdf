//! HTTP API server configuration

use serde::{Deserialize, Serialize};

/// Default upload cap (10 MiB), matching the chat client's file limit
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// HTTP API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address for HTTP server (e.g., "0.0.0.0:8000")
    pub listen_addr: String,
    /// API keys for authentication (empty = no auth required)
    pub api_keys: Vec<String>,
    /// Enable permissive CORS for browser-based clients
    pub cors_enabled: bool,
    /// Maximum accepted upload body in bytes
    pub max_upload_bytes: usize,
    /// Maximum accepted question length in bytes
    pub max_question_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8000".to_string(),
            api_keys: Vec::new(),
            cors_enabled: true,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_question_bytes: 10_000,
        }
    }
}
