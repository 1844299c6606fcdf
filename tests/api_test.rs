//! HTTP API tests
//!
//! Drive the full axum app in-process with `oneshot`, using offline hash
//! embeddings and stub generation/translation backends.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use medrag::config::{Config, ServerConfig};
use medrag::embedding::HashBackend;
use medrag::generation::{GenerationResult, Generator};
use medrag::rag::RagService;
use medrag::server::build_app;
use medrag::translation::{TranslationError, TranslationResult, Translator};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "medrag-test-boundary";

struct EchoGenerator;

#[async_trait]
impl Generator for EchoGenerator {
    async fn generate(&self, prompt: &str) -> GenerationResult<String> {
        let context = prompt
            .strip_prefix("Context: ")
            .and_then(|rest| rest.split("\n\nTask:").next())
            .unwrap_or_default();
        Ok(format!("Based on the document: {}", context))
    }

    fn model(&self) -> &str {
        "echo"
    }
}

struct UpperTranslator;

#[async_trait]
impl Translator for UpperTranslator {
    async fn translate(&self, text: &str, target: &str) -> TranslationResult<String> {
        if target == "ar" {
            return Err(TranslationError::Failed("service unavailable".to_string()));
        }
        Ok(format!("[{}] {}", target, text.to_uppercase()))
    }

    fn name(&self) -> &str {
        "upper"
    }
}

fn app_with(server: ServerConfig) -> Router {
    let config = Config {
        server: server.clone(),
        ..Default::default()
    };
    let rag = RagService::with_backends(
        &config,
        Arc::new(HashBackend::new(config.embedding.dimensions)),
        Arc::new(EchoGenerator),
        Arc::new(UpperTranslator),
    );
    build_app(Arc::new(rag), &server)
}

fn app() -> Router {
    app_with(ServerConfig::default())
}

fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn query_request(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/query")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

const REPORT: &str = "Cardiology report\n\
    Echocardiogram shows mild left ventricular hypertrophy.\n\
    Prescribed lisinopril 10 mg once daily for hypertension.\n\
    Repeat blood pressure check in four weeks.";

async fn upload_report(app: &Router) -> String {
    let (status, body) = send(
        app,
        upload_request(multipart_body("file", "report.txt", "text/plain", REPORT.as_bytes())),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["document_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_and_root_are_public() {
    let app = app_with(ServerConfig {
        api_keys: vec!["secret".to_string()],
        ..Default::default()
    });

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));

    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["api"], "MultiLingual Medical RAG");
    assert_eq!(body["endpoints"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn protected_routes_require_key_when_configured() {
    let app = app_with(ServerConfig {
        api_keys: vec!["secret".to_string()],
        ..Default::default()
    });

    let (status, body) = send(&app, get("/languages")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let request = Request::builder()
        .uri("/languages")
        .header(header::AUTHORIZATION, "Bearer secret")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn languages_lists_name_to_code_in_catalogue_order() {
    let (status, body) = send(&app(), get("/languages")).await;
    assert_eq!(status, StatusCode::OK);

    let map = body.as_object().unwrap();
    assert_eq!(map.len(), 19);
    assert_eq!(map["Chinese (Simplified)"], "zh-CN");
    assert_eq!(map.keys().next().map(String::as_str), Some("English"));
}

#[tokio::test]
async fn upload_returns_document_id() {
    let app = app();
    let (status, body) = send(
        &app,
        upload_request(multipart_body("file", "report.txt", "text/plain", REPORT.as_bytes())),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["filename"], "report.txt");
    assert_eq!(body["title"], "Cardiology report");
    assert_eq!(body["message"], "File processed successfully.");
    assert!(uuid::Uuid::parse_str(body["document_id"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn upload_without_file_field() {
    let (status, body) = send(
        &app(),
        upload_request(multipart_body("attachment", "x.txt", "text/plain", b"hello")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "No file provided.");
}

#[tokio::test]
async fn upload_that_is_not_multipart() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/upload")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let (status, body) = send(&app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "No file provided.");
}

#[tokio::test]
async fn upload_without_text() {
    let (status, body) = send(
        &app(),
        upload_request(multipart_body("file", "blank.txt", "text/plain", b" \n \n ")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Could not extract text from the PDF.");
    assert_eq!(body["code"], "NO_TEXT");
}

#[tokio::test]
async fn upload_over_limit_is_rejected() {
    let app = app_with(ServerConfig {
        max_upload_bytes: 1024,
        ..Default::default()
    });
    let big = vec![b'a'; 4096];
    let (status, _) = send(
        &app,
        upload_request(multipart_body("file", "big.txt", "text/plain", &big)),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn upload_body_over_transport_limit() {
    let app = app_with(ServerConfig {
        max_upload_bytes: 1024,
        ..Default::default()
    });
    let big = vec![b'a'; 200_000];
    let (status, body) = send(
        &app,
        upload_request(multipart_body("file", "big.txt", "text/plain", &big)),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["detail"], "File too large.");
    assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn upload_binary_is_unsupported() {
    let data: Vec<u8> = [0xff, 0xfe, 0x00, 0x9f].repeat(64);
    let (status, body) = send(
        &app(),
        upload_request(multipart_body(
            "file",
            "scan.bin",
            "application/octet-stream",
            &data,
        )),
    )
    .await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["code"], "UNSUPPORTED_CONTENT");
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("Error processing file:"));
}

#[tokio::test]
async fn corrupt_pdf_is_an_extraction_failure() {
    let (status, body) = send(
        &app(),
        upload_request(multipart_body(
            "file",
            "broken.pdf",
            "application/pdf",
            b"%PDF-1.4\nnot really a pdf",
        )),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "EXTRACTION_FAILED");
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("Error processing file: Failed to parse PDF"));
}

#[tokio::test]
async fn pdf_upload_can_be_queried() {
    let app = app();
    let pdf = include_bytes!("fixtures/cardiology_report.pdf");
    let (status, body) = send(
        &app,
        upload_request(multipart_body("file", "report.pdf", "application/pdf", pdf)),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["filename"], "report.pdf");
    let document_id = body["document_id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        query_request(json!({
            "document_id": document_id,
            "question": "What was prescribed for hypertension?"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["response"].as_str().unwrap().contains("lisinopril"));
}

#[tokio::test]
async fn query_answers_in_english_by_default() {
    let app = app();
    let document_id = upload_report(&app).await;

    let (status, body) = send(
        &app,
        query_request(json!({
            "document_id": document_id,
            "question": "What dose of lisinopril was prescribed?"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["language"], "en");
    let response = body["response"].as_str().unwrap();
    assert!(response.starts_with("Based on the document:"));
    assert!(response.contains("lisinopril 10 mg"));
}

#[tokio::test]
async fn query_translates_and_reports_resolved_code() {
    let app = app();
    let document_id = upload_report(&app).await;

    let (status, body) = send(
        &app,
        query_request(json!({
            "document_id": document_id,
            "question": "What was prescribed?",
            "language": "Spanish"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["language"], "es");
    assert!(body["response"].as_str().unwrap().starts_with("[es] BASED ON"));
}

#[tokio::test]
async fn query_with_unknown_language_falls_back_to_english() {
    let app = app();
    let document_id = upload_report(&app).await;

    let (status, body) = send(
        &app,
        query_request(json!({
            "document_id": document_id,
            "question": "Summary?",
            "language": "Elvish"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["language"], "en");
}

#[tokio::test]
async fn query_unknown_document() {
    let (status, body) = send(
        &app(),
        query_request(json!({"document_id": "missing", "question": "Anything?"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["detail"],
        "Document not found. Please upload the document again."
    );
}

#[tokio::test]
async fn query_rejects_blank_and_oversized_questions() {
    let app = app();
    let document_id = upload_report(&app).await;

    let (status, body) = send(
        &app,
        query_request(json!({"document_id": document_id, "question": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_QUESTION");

    let (status, _) = send(
        &app,
        query_request(json!({"document_id": document_id, "question": "x".repeat(10_001)})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn query_translation_failure_is_server_error() {
    let app = app();
    let document_id = upload_report(&app).await;

    let (status, body) = send(
        &app,
        query_request(json!({
            "document_id": document_id,
            "question": "What was prescribed?",
            "language": "ar"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Translation error: service unavailable");
}

#[tokio::test]
async fn malformed_query_body() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/query")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"question\": 5}"))
        .unwrap();
    let (status, body) = send(&app(), request).await;
    assert!(status.is_client_error());
    assert_eq!(body["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/query")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
