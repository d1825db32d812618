//! HTTP server exposing the classifier over JSON.

mod error;
mod extractors;
mod handlers;
mod middleware;
mod router;
mod state;

pub use error::{ApiError, INTERNAL_ERROR_MESSAGE, INVALID_BODY_MESSAGE};
pub use router::build_router;
pub use state::{AppState, SharedState};

use log::{error, info};
use sentiment::SentimentClassifier;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

pub const DEFAULT_PORT: u16 = 8001;

/// Listen address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: DEFAULT_PORT,
        }
    }
}

/// Serve `classifier` until Ctrl-C.
///
/// The classifier must already be fully initialized; nothing is bound
/// until the caller hands it over.
pub async fn serve(
    config: &ServerConfig,
    classifier: Arc<dyn SentimentClassifier>,
) -> std::io::Result<()> {
    let service = classifier.descriptor().service;
    let state: SharedState = Arc::new(AppState::new(classifier));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!("{service} listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
        .await
}

/// Resolves once `signal` fires. If the signal cannot be listened for,
/// logs the failure and never resolves, so the server keeps running.
async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Shutting down"),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {e}");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_shutdown_fires_on_signal() {
        let fired = tokio::time::timeout(Duration::from_millis(200), shutdown_on(async { Ok(()) }))
            .await;
        assert!(fired.is_ok());
    }

    #[tokio::test]
    async fn test_shutdown_never_fires_when_signal_unavailable() {
        let signal = async { Err(std::io::Error::other("no signal handler")) };
        let fired = tokio::time::timeout(Duration::from_millis(50), shutdown_on(signal)).await;
        assert!(fired.is_err());
    }
}
