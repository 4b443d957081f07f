//! Shutdown coordination.

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown of one server instance.
///
/// Wraps a broadcast channel. `trigger` may be called any number of times
/// from any task: the first call wakes every subscriber, later calls send
/// into a channel whose messages nobody is obliged to read, and a send
/// without receivers is simply ignored. There is no primitive here that
/// faults on reuse.
#[derive(Debug)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Request shutdown. Idempotent.
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
    async fn trigger_unblocks_subscriber() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();
        shutdown.trigger();
        rx.recv().await.unwrap();
    }

    #[tokio::test]
    async fn repeated_trigger_is_a_no_op() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();
        shutdown.trigger();
        shutdown.trigger();
        shutdown.trigger();
        // Lagging behind extra triggers still counts as being woken.
        match rx.recv().await {
            Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {}
            Err(error) => panic!("unexpected recv error: {error}"),
        }
    }
}
