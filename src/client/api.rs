//! Typed wrappers around the HTTP endpoints

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

use super::ClientError;
use crate::config::DEFAULT_MAX_UPLOAD_BYTES;
use crate::server::handlers::UPLOAD_FIELD;
use crate::server::types::{HealthResponse, QueryRequest, QueryResponse, UploadResponse};

/// Largest file the client will send
pub const MAX_CLIENT_UPLOAD_BYTES: u64 = DEFAULT_MAX_UPLOAD_BYTES as u64;

/// Answers can take a while: retrieval, generation and translation in series
const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

/// Fallback when an error body carries no `detail`
const GENERIC_SERVER_ERROR: &str = "Server error";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

/// Check a file before upload: `.pdf` extension and at most 10 MiB
pub fn validate_upload(path: &Path, size: u64) -> Result<(), ClientError> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if !is_pdf || size == 0 || size > MAX_CLIENT_UPLOAD_BYTES {
        return Err(ClientError::InvalidFile);
    }
    Ok(())
}

/// Client for a medrag server
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(base_url));
        }
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url,
            api_key: None,
        })
    }

    /// Send `Authorization: Bearer <key>` with every request
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// Decode a success body, or turn an error status into `ClientError::Api`
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|b| b.detail)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string());
        warn!("API error {}: {}", status.as_u16(), detail);
        Err(ClientError::Api {
            status: status.as_u16(),
            detail,
        })
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self.http.get(self.url("/health")).send().await?;
        Self::decode(response).await
    }

    /// Supported languages as `(name, code)` pairs in server order
    pub async fn languages(&self) -> Result<Vec<(String, String)>, ClientError> {
        let request = self.authorized(self.http.get(self.url("/languages")));
        let map: Map<String, Value> = Self::decode(request.send().await?).await?;
        Ok(map
            .into_iter()
            .filter_map(|(name, code)| code.as_str().map(|c| (name, c.to_string())))
            .collect())
    }

    /// Validate and upload a PDF from disk
    pub async fn upload(&self, path: &Path) -> Result<UploadResponse, ClientError> {
        let size = tokio::fs::metadata(path).await?.len();
        validate_upload(path, size)?;

        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string());
        self.upload_bytes(&filename, bytes).await
    }

    /// Upload in-memory bytes under `filename` (no local validation)
    pub async fn upload_bytes(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse, ClientError> {
        debug!("Uploading {} ({} bytes)", filename, bytes.len());
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/pdf")?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let request = self.authorized(self.http.post(self.url("/upload")).multipart(form));
        Self::decode(request.send().await?).await
    }

    pub async fn query(
        &self,
        document_id: &str,
        question: &str,
        language: &str,
    ) -> Result<QueryResponse, ClientError> {
        let body = QueryRequest {
            document_id: document_id.to_string(),
            question: question.to_string(),
            language: language.to_string(),
        };
        let request = self.authorized(self.http.post(self.url("/query")).json(&body));
        Self::decode(request.send().await?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_validate_upload() {
        assert!(validate_upload(Path::new("scan.pdf"), 1024).is_ok());
        assert!(validate_upload(Path::new("SCAN.PDF"), 1024).is_ok());
        assert!(validate_upload(Path::new("scan.png"), 1024).is_err());
        assert!(validate_upload(Path::new("scan.pdf"), 0).is_err());
        assert!(validate_upload(Path::new("scan.pdf"), MAX_CLIENT_UPLOAD_BYTES).is_ok());
        let err = validate_upload(Path::new("scan.pdf"), MAX_CLIENT_UPLOAD_BYTES + 1).unwrap_err();
        assert_eq!(err.to_string(), "Please upload a valid PDF file (max 10MB)");
    }

    #[test]
    fn test_rejects_non_http_url() {
        assert!(ApiClient::new("localhost:8000").is_err());
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[tokio::test]
    async fn test_query_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .and(header("authorization", "Bearer k1"))
            .and(body_json(json!({
                "document_id": "doc-1",
                "question": "dose?",
                "language": "hi"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"response": "५ मि.ग्रा.", "language": "hi"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri())
            .unwrap()
            .with_api_key(Some("k1".to_string()));
        let answer = client.query("doc-1", "dose?", "hi").await.unwrap();
        assert_eq!(answer.language, "hi");
        assert_eq!(answer.response, "५ मि.ग्रा.");
    }

    #[tokio::test]
    async fn test_error_detail_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "detail": "Document not found. Please upload the document again.",
                "code": "DOCUMENT_NOT_FOUND"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri()).unwrap();
        let err = client.query("gone", "q", "en").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(
            err.to_string(),
            "Document not found. Please upload the document again."
        );
    }

    #[tokio::test]
    async fn test_error_without_detail_is_generic() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri()).unwrap();
        let err = client.health().await.unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 502, ref detail } if detail == "Server error"));
    }

    #[tokio::test]
    async fn test_languages_keep_server_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/languages"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"English": "en", "Hindi": "hi", "Arabic": "ar"}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri()).unwrap();
        let langs = client.languages().await.unwrap();
        let codes: Vec<&str> = langs.iter().map(|(_, c)| c.as_str()).collect();
        assert_eq!(codes, vec!["en", "hi", "ar"]);
    }

    #[tokio::test]
    async fn test_upload_sends_file_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "document_id": "abc",
                "filename": "report.pdf",
                "message": "File processed successfully."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("report.pdf");
        let mut file = std::fs::File::create(&file_path).unwrap();
        file.write_all(b"%PDF-1.4 test").unwrap();

        let client = ApiClient::new(&server.uri()).unwrap();
        let uploaded = client.upload(&file_path).await.unwrap();
        assert_eq!(uploaded.document_id, "abc");

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"file\""));
        assert!(body.contains("filename=\"report.pdf\""));
    }

    #[tokio::test]
    async fn test_upload_rejects_non_pdf_locally() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("notes.txt");
        std::fs::write(&file_path, "hello").unwrap();

        let client = ApiClient::new(&server.uri()).unwrap();
        assert!(matches!(
            client.upload(&file_path).await,
            Err(ClientError::InvalidFile)
        ));
    }
}
