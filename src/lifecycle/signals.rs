//! OS signal handling.
//!
//! # Responsibilities
//! - Register handlers for SIGTERM and SIGINT
//! - Translate the first signal into a shutdown trigger
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - The daemon exits cooperatively; there is no forced second-signal path,
//!   since a cycle is short and never blocks longer than its command timeouts

use crate::lifecycle::Shutdown;

/// Wait for a termination signal, then trigger `shutdown`.
///
/// Intended to be spawned next to the daemon loop.
#[cfg(unix)]
pub async fn listen(shutdown: Shutdown) {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to install SIGTERM handler");
            return;
        }
    };
    let mut sigint = match signal(SignalKind::interrupt()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to install SIGINT handler");
            return;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => tracing::info!("Received SIGTERM, shutting down"),
        _ = sigint.recv() => tracing::info!("Received SIGINT, shutting down"),
    }
    shutdown.trigger();
}

/// Wait for Ctrl-C, then trigger `shutdown`.
#[cfg(not(unix))]
pub async fn listen(shutdown: Shutdown) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        return;
    }
    tracing::info!("Received Ctrl-C, shutting down");
    shutdown.trigger();
}
