//! HTTP embedding backend for OpenAI-compatible APIs

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::traits::{normalize_embedding, EmbeddingBackend, EmbeddingError, EmbeddingResult};
use crate::config::{EmbeddingConfig, OPENAI_API_KEY_ENV};
use crate::types::Embedding;

/// HTTP embedding backend for OpenAI-compatible APIs
#[derive(Debug)]
pub struct HttpBackend {
    client: Client,
    endpoint: String,
    model: String,
    dimensions: usize,
    max_batch_size: usize,
}

/// OpenAI embedding request format
#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
    encoding_format: &'a str,
}

/// OpenAI embedding response format
#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: usize,
}

/// OpenAI error response format
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl HttpBackend {
    /// Create a new HTTP embedding backend
    pub fn new(config: &EmbeddingConfig) -> EmbeddingResult<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .filter(|e| !e.is_empty())
            .ok_or_else(|| EmbeddingError::Config("embedding endpoint not set".to_string()))?;

        info!(
            "Initializing HTTP embedding backend: endpoint={}, model={}",
            endpoint, config.model
        );

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var(OPENAI_API_KEY_ENV).ok());

        if let Some(key) = &api_key {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", key))
                    .map_err(|e| EmbeddingError::Config(format!("Invalid API key format: {}", e)))?,
            );
        } else if endpoint.contains("openai.com") || endpoint.contains("azure.com") {
            warn!("No API key provided for {}", endpoint);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| EmbeddingError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            model: config.model.clone(),
            dimensions: config.dimensions,
            max_batch_size: config.max_batch_size.max(1),
        })
    }

    /// Make one embedding request for at most `max_batch_size` texts
    async fn request_embeddings(&self, texts: &[String]) -> EmbeddingResult<Vec<Embedding>> {
        let request = EmbeddingRequest {
            model: &self.model,
            input: texts,
            // Only text-embedding-3-* accepts a dimensions override
            dimensions: self
                .model
                .contains("text-embedding-3")
                .then_some(self.dimensions),
            encoding_format: "float",
        };

        debug!(
            "Sending embedding request to {} for {} texts",
            self.endpoint,
            texts.len()
        );

        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_ms = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(|s| s * 1000);
            return Err(EmbeddingError::RateLimited { retry_after_ms });
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<ErrorResponse>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);
            return Err(EmbeddingError::EmbeddingFailed(format!(
                "API error ({}): {}",
                status, message
            )));
        }

        let parsed: EmbeddingResponse = response.json().await.map_err(|e| {
            EmbeddingError::EmbeddingFailed(format!("Failed to parse response: {}", e))
        })?;

        if let Some(usage) = &parsed.usage {
            debug!("Embedding request used {} tokens", usage.total_tokens);
        }

        if parsed.data.len() != texts.len() {
            return Err(EmbeddingError::EmbeddingFailed(format!(
                "Requested {} embeddings, received {}",
                texts.len(),
                parsed.data.len()
            )));
        }

        let mut data = parsed.data;
        data.sort_by_key(|d| d.index);

        data.into_iter()
            .map(|d| {
                if d.embedding.len() != self.dimensions {
                    return Err(EmbeddingError::DimensionMismatch {
                        expected: self.dimensions,
                        actual: d.embedding.len(),
                    });
                }
                Ok(normalize_embedding(&d.embedding))
            })
            .collect()
    }
}

#[async_trait]
impl EmbeddingBackend for HttpBackend {
    async fn embed(&self, text: &str) -> EmbeddingResult<Embedding> {
        self.request_embeddings(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::EmbeddingFailed("No embedding returned".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> EmbeddingResult<Vec<Embedding>> {
        let mut all = Vec::with_capacity(texts.len());
        for batch in texts.chunks(self.max_batch_size) {
            all.extend(self.request_embeddings(batch).await?);
        }
        Ok(all)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmbeddingBackendKind;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer, dims: usize, batch: usize) -> EmbeddingConfig {
        EmbeddingConfig {
            backend: EmbeddingBackendKind::Http,
            endpoint: Some(format!("{}/v1/embeddings", server.uri())),
            api_key: Some("test-key".to_string()),
            model: "test-model".to_string(),
            dimensions: dims,
            timeout_secs: 5,
            max_batch_size: batch,
        }
    }

    #[test]
    fn test_missing_endpoint_is_config_error() {
        let err = HttpBackend::new(&EmbeddingConfig::default()).unwrap_err();
        assert!(matches!(err, EmbeddingError::Config(_)));
    }

    #[tokio::test]
    async fn test_embed_batch_orders_by_index_and_normalizes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({"model": "test-model"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {"embedding": [0.0, 2.0], "index": 1},
                    {"embedding": [3.0, 4.0], "index": 0}
                ],
                "usage": {"prompt_tokens": 4, "total_tokens": 4}
            })))
            .mount(&server)
            .await;

        let backend = HttpBackend::new(&config_for(&server, 2, 10)).unwrap();
        let out = backend
            .embed_batch(&["first".to_string(), "second".to_string()])
            .await
            .unwrap();

        assert_eq!(out.len(), 2);
        assert!((out[0][0] - 0.6).abs() < 1e-6);
        assert!((out[1][1] - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_embed_batch_splits_requests() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"embedding": [1.0, 0.0], "index": 0}]
            })))
            .expect(3)
            .mount(&server)
            .await;

        let backend = HttpBackend::new(&config_for(&server, 2, 1)).unwrap();
        let texts: Vec<String> = vec!["a".into(), "b".into(), "c".into()];
        let out = backend.embed_batch(&texts).await.unwrap();
        assert_eq!(out.len(), 3);
    }

    #[tokio::test]
    async fn test_rate_limit_reports_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "2"))
            .mount(&server)
            .await;

        let backend = HttpBackend::new(&config_for(&server, 2, 10)).unwrap();
        let err = backend.embed("x").await.unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::RateLimited {
                retry_after_ms: Some(2000)
            }
        ));
    }

    #[tokio::test]
    async fn test_api_error_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"message": "model not loaded", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let backend = HttpBackend::new(&config_for(&server, 2, 10)).unwrap();
        let err = backend.embed("x").await.unwrap_err();
        assert!(err.to_string().contains("model not loaded"));
    }

    #[tokio::test]
    async fn test_dimension_mismatch_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"embedding": [1.0, 0.0, 0.0], "index": 0}]
            })))
            .mount(&server)
            .await;

        let backend = HttpBackend::new(&config_for(&server, 2, 10)).unwrap();
        let err = backend.embed("x").await.unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }
}
