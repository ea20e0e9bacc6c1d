//! Shutdown coordination for the daemon.

use tokio::sync::broadcast;

/// Cancellation token for the daemon loop.
///
/// Wraps a broadcast channel: signal handlers trigger it, the daemon loop
/// subscribes and observes it at its control points (cycle start and the
/// inter-cycle wait).
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown token.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger shutdown. Safe to call more than once.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trigger_reaches_subscriber() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();
        shutdown.trigger();
        rx.recv().await.unwrap();
    }

    #[tokio::test]
    async fn trigger_without_subscribers_is_harmless() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        shutdown.trigger();
    }
}
