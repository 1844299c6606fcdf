use anyhow::{Context, Result};
use medrag::config::Config;
use medrag::rag::RagService;
use medrag::server::HttpServer;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::broadcast;
use tracing::info;

pub async fn run(mut config: Config, listen: Option<String>) -> Result<()> {
    if let Some(addr) = listen {
        config.server.listen_addr = addr;
        config.validate()?;
    }

    info!("Starting medrag {}", env!("CARGO_PKG_VERSION"));

    let rag = RagService::new(&config).context("Failed to initialize services")?;
    let server = HttpServer::new(config.server.clone(), Arc::new(rag));

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let mut handle = tokio::spawn(async move { server.run(shutdown_rx).await });

    tokio::select! {
        result = &mut handle => {
            // Server stopped on its own (e.g. failed to bind)
            return result.context("HTTP server task panicked")?;
        }
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = wait_for_sigterm() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    let _ = shutdown_tx.send(());
    handle.await.context("HTTP server task panicked")??;
    info!("Shutdown complete");
    Ok(())
}

#[cfg(unix)]
async fn wait_for_sigterm() {
    use tokio::signal::unix::{signal, SignalKind};
    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            tracing::warn!("Failed to register SIGTERM handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_sigterm() {
    std::future::pending::<()>().await
}
