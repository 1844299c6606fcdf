//! HTTP API request handlers

use axum::{
    extract::{
        multipart::{Multipart, MultipartError, MultipartRejection},
        rejection::JsonRejection,
        State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::languages;
use crate::rag::{RagError, RagService};
use crate::util::truncate_str;

use super::types::*;

/// Multipart field carrying the uploaded document
pub const UPLOAD_FIELD: &str = "file";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub rag: Arc<RagService>,
    /// Largest accepted file, in bytes
    pub max_upload_bytes: usize,
}

fn error_response(status: StatusCode, body: ErrorResponse) -> Response {
    (status, Json(body)).into_response()
}

fn rag_error_response(err: &RagError) -> Response {
    if err.is_client_error() {
        debug!("Request rejected: {}", err);
    } else {
        error!("Request failed: {}", err);
    }
    error_response(err.status_code(), ErrorResponse::from(err))
}

/// API information
pub async fn root() -> impl IntoResponse {
    Json(ApiInfo::current())
}

/// Health check (never authenticated)
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::healthy())
}

/// Supported languages as a name → code object
pub async fn languages(State(state): State<AppState>) -> impl IntoResponse {
    Json(languages::name_to_code_map(state.rag.languages()))
}

fn multipart_error(err: MultipartError) -> Response {
    let status = err.status();
    warn!("Rejected upload body: {}", err.body_text());
    let body = if status == StatusCode::PAYLOAD_TOO_LARGE {
        ErrorResponse::new("PAYLOAD_TOO_LARGE", "File too large.")
    } else {
        ErrorResponse::bad_request(format!("Invalid upload: {}", err.body_text()))
    };
    error_response(status, body)
}

/// Upload a document (multipart field `file`) and index it
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let no_file = || {
        error_response(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("NO_FILE", "No file provided."),
        )
    };

    let Ok(mut multipart) = multipart else {
        return no_file();
    };

    let mut upload = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some(UPLOAD_FIELD) {
                    continue;
                }
                let filename = field.file_name().map(str::to_string);
                let mime = field.content_type().map(str::to_string);
                match field.bytes().await {
                    Ok(bytes) => {
                        upload = Some((bytes, filename, mime));
                        break;
                    }
                    Err(e) => return multipart_error(e),
                }
            }
            Ok(None) => break,
            Err(e) => return multipart_error(e),
        }
    }

    let Some((bytes, filename, mime)) = upload else {
        return no_file();
    };
    if bytes.is_empty() {
        return no_file();
    }
    if bytes.len() > state.max_upload_bytes {
        return error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            ErrorResponse::payload_too_large(state.max_upload_bytes),
        );
    }

    debug!(
        "Upload received: filename={:?}, content_type={:?}, {} bytes",
        filename,
        mime,
        bytes.len()
    );

    match state.rag.ingest(bytes.to_vec(), filename, mime).await {
        Ok(ingested) => (StatusCode::OK, Json(UploadResponse::from(ingested))).into_response(),
        Err(RagError::NoText) => rag_error_response(&RagError::NoText),
        Err(e) => {
            error!("Error processing file: {}", e);
            error_response(
                e.status_code(),
                ErrorResponse::new(e.code(), format!("Error processing file: {}", e)),
            )
        }
    }
}

/// Answer a question about an uploaded document
pub async fn query(
    State(state): State<AppState>,
    request: Result<Json<QueryRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(json) => json,
        Err(rejection) => {
            return error_response(
                rejection.status(),
                ErrorResponse::new("INVALID_REQUEST", rejection.body_text()),
            )
        }
    };

    debug!(
        "Query: document_id={}, language={}, question={:?}",
        request.document_id,
        request.language,
        truncate_str(&request.question, 80)
    );

    match state
        .rag
        .answer(&request.document_id, &request.question, &request.language)
        .await
    {
        Ok(answer) => (StatusCode::OK, Json(QueryResponse::from(answer))).into_response(),
        Err(e) => rag_error_response(&e),
    }
}
