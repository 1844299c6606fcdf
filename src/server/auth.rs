//! Optional API key authentication
//!
//! Keys are accepted as `Authorization: Bearer <key>` or as the raw header
//! value. With no keys configured every request passes.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use super::types::ErrorResponse;

/// Configured API keys shared with the middleware
#[derive(Clone, Default)]
pub struct AuthState {
    api_keys: Arc<Vec<String>>,
}

impl AuthState {
    pub fn new(api_keys: Vec<String>) -> Self {
        let api_keys = api_keys.into_iter().filter(|k| !k.is_empty()).collect();
        Self {
            api_keys: Arc::new(api_keys),
        }
    }

    pub fn auth_required(&self) -> bool {
        !self.api_keys.is_empty()
    }

    /// Whether the request headers carry an accepted key
    pub fn authorize(&self, headers: &HeaderMap) -> bool {
        if !self.auth_required() {
            return true;
        }
        presented_key(headers)
            .map(|key| self.api_keys.iter().any(|k| k == key))
            .unwrap_or(false)
    }
}

/// Key from the `Authorization` header, with or without a `Bearer ` prefix
fn presented_key(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let key = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    (!key.is_empty()).then_some(key)
}

/// Rejects requests without a valid key when authentication is enabled
pub async fn auth_middleware(
    State(auth): State<AuthState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if auth.authorize(request.headers()) {
        return next.run(request).await;
    }

    debug!("Rejected unauthenticated request to {}", request.uri().path());
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse::unauthorized()),
    )
        .into_response()
}
