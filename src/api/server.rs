//! HTTP server lifecycle: bind → serve → graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::api::router::api_router;
use crate::config::ServiceConfig;
use crate::interpretation::{InteractionLog, ProviderRegistry};

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(std::io::Error),
}

/// Run the service until Ctrl+C or SIGTERM.
pub async fn run(config: ServiceConfig) -> Result<(), ServerError> {
    let log = InteractionLog::new(config.log_dir.clone());
    tracing::info!(
        gemini = config.providers.gemini_api_key.is_some(),
        deepseek = config.providers.deepseek_api_key.is_some(),
        log_dir = %log.dir().display(),
        "Providers configured"
    );
    let registry = Arc::new(ProviderRegistry::new(config.providers.clone(), log));

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind_addr,
            source,
        })?;
    let addr = listener.local_addr().map_err(ServerError::Serve)?;
    tracing::info!(%addr, "LiuYao service listening");

    let app = api_router(registry.clone());
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve);

    // Blocking HTTP clients must not be dropped on a runtime thread
    let _ = tokio::task::spawn_blocking(move || drop(registry)).await;

    tracing::info!("LiuYao service stopped");
    served
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
