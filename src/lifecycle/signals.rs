//! OS signal handling.

/// Wait for SIGINT, then run the supplied stop action.
///
/// Callers spawn this alongside the server they want interrupted; the
/// action typically calls `stop` on one or more servers, which is safe
/// even if something else already stopped them.
pub async fn on_ctrl_c<F: FnOnce()>(stop: F) {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to install SIGINT handler");
        return;
    }
    tracing::info!("interrupt received, shutting down");
    stop();
}
