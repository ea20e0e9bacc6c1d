//! Daemon loop: periodic re-registration with graceful de-registration.
//!
//! # Responsibilities
//! - Run `register` immediately on start and again every interval
//! - Keep running through failed cycles (transient network issues)
//! - On shutdown, run `unregister` exactly once, best-effort
//!
//! # States
//! ```text
//! Running:  register → wait interval → register → ...
//! Stopping: entered on the shutdown signal; the wait is interrupted,
//!           one unregister attempt runs, then the loop returns
//! ```

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time;

use crate::reconcile::Reconciler;

/// Periodically re-asserts this host's registration in a backend.
pub struct Daemon {
    reconciler: Reconciler,
    backend: String,
    ip: String,
    interval: Duration,
}

impl Daemon {
    /// Create a daemon registering `ip` into `backend` every `interval`.
    pub fn new(reconciler: Reconciler, backend: String, ip: String, interval: Duration) -> Self {
        Self {
            reconciler,
            backend,
            ip,
            interval,
        }
    }

    /// Run until `shutdown` fires, then de-register once and return.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            backend = %self.backend,
            ip = %self.ip,
            interval_secs = self.interval.as_secs(),
            "Daemon starting"
        );

        let mut ticker = time::interval(self.interval);

        loop {
            tokio::select! {
                // First tick fires immediately, so registration happens on start.
                _ = ticker.tick() => {
                    match self.reconciler.register(&self.backend, &self.ip).await {
                        Ok(()) => {
                            tracing::debug!(backend = %self.backend, "Registration cycle complete");
                        }
                        Err(e) => {
                            // A failed cycle is retried at the next interval.
                            tracing::warn!(
                                backend = %self.backend,
                                error = %e,
                                "Registration cycle failed"
                            );
                        }
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Daemon received shutdown signal, exiting loop");
                    break;
                }
            }
        }

        // Single best-effort de-registration on the way out.
        match self.reconciler.unregister(&self.backend, &self.ip).await {
            Ok(()) => tracing::info!(backend = %self.backend, "De-registered on shutdown"),
            Err(e) => tracing::warn!(
                backend = %self.backend,
                error = %e,
                "De-registration on shutdown failed"
            ),
        }
    }
}
