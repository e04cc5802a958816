//! Stop signal shared by the serve loop and the table-update task.
//!
//! `HttpServer::run` holds one receiver: axum's graceful shutdown drains
//! in-flight dispatches once it fires, after which the table-update task is
//! aborted. Test servers trigger it from `Drop`.

use tokio::sync::broadcast;

/// One-shot broadcast used to stop a running router.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver to hand to `HttpServer::run`.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the signal. Returns how many receivers were listening; zero
    /// when the server has already stopped.
    pub fn trigger(&self) -> usize {
        self.tx.send(()).unwrap_or(0)
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
    async fn test_trigger_reaches_every_receiver() {
        let shutdown = Shutdown::new();
        let mut server = shutdown.subscribe();
        let mut updates = shutdown.clone().subscribe();

        assert_eq!(shutdown.trigger(), 2);
        assert!(server.recv().await.is_ok());
        assert!(updates.recv().await.is_ok());
    }

    #[test]
    fn test_trigger_without_receivers_is_harmless() {
        let shutdown = Shutdown::new();
        assert_eq!(shutdown.trigger(), 0);
    }
}
