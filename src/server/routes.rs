//! HTTP API route definitions

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use super::auth::{auth_middleware, AuthState};
use super::handlers::{self, AppState};

/// Headroom for multipart boundaries and part headers on top of the file limit
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create the API router.
///
/// `/` and `/health` are always public; the remaining routes go through the
/// API key middleware.
pub fn create_router(app_state: AppState, auth_state: AuthState) -> Router {
    let upload_limit = app_state
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let protected = Router::new()
        .route("/languages", get(handlers::languages))
        .route(
            "/upload",
            post(handlers::upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/query", post(handlers::query))
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .merge(protected)
        .with_state(app_state)
}
