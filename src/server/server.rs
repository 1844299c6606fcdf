//! Axum HTTP server for the medrag API

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{http::Method, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::rag::RagService;

use super::auth::AuthState;
use super::handlers::AppState;
use super::routes::create_router;

/// Build the complete application: routes, auth, CORS and request tracing
pub fn build_app(rag: Arc<RagService>, config: &ServerConfig) -> Router {
    let app_state = AppState {
        rag,
        max_upload_bytes: config.max_upload_bytes,
    };
    let auth_state = AuthState::new(config.api_keys.clone());
    if auth_state.auth_required() {
        info!("API key authentication enabled ({} keys)", config.api_keys.len());
    }

    let mut app = create_router(app_state, auth_state);

    if config.cors_enabled {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
            .allow_origin(Any);
        app = app.layer(cors);
    }

    app.layer(TraceLayer::new_for_http())
}

/// HTTP API server
pub struct HttpServer {
    config: ServerConfig,
    rag: Arc<RagService>,
}

impl HttpServer {
    pub fn new(config: ServerConfig, rag: Arc<RagService>) -> Self {
        Self { config, rag }
    }

    /// Serve until a message arrives on `shutdown`
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .listen_addr
            .parse()
            .context("Invalid HTTP listen address")?;

        let app = build_app(self.rag.clone(), &self.config);

        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind HTTP server to {}", addr))?;

        info!("medrag API listening on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                info!("HTTP server shutting down");
            })
            .await
            .context("HTTP server error")?;

        Ok(())
    }
}
