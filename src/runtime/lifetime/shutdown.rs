use tokio::signal;
use tracing::warn;

/// 等待 Ctrl+C 信号
pub async fn listen_for_shutdown() {
    match signal::ctrl_c().await {
        Ok(()) => warn!("Shutdown signal received, initiating graceful shutdown..."),
        Err(e) => warn!("Failed to listen for shutdown signal: {}", e),
    }
}
