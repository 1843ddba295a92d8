use tokio::signal;
use tracing::info;

/// Wait for a shutdown signal (SIGINT or SIGTERM).
///
/// Intended for use with `axum::serve(..).with_graceful_shutdown(..)`:
/// in-flight requests drain while new connections are refused. Dropped
/// request futures abort their in-flight database queries.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
