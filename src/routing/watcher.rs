//! Routes directory watcher for hot reload.

use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::routing::table::{RouteTable, RouteTableBuilder};

/// Rebuild the table and publish it, keeping the current one on failure.
pub fn rebuild_and_publish(
    builder: &RouteTableBuilder,
    tx: &mpsc::UnboundedSender<RouteTable>,
    trigger: &str,
) {
    match builder.build() {
        Ok(table) => {
            tracing::info!(trigger, route_count = table.len(), "Route table rebuilt");
            if tx.send(table).is_err() {
                tracing::debug!("Route table receiver dropped, discarding rebuild");
            }
        }
        Err(e) => {
            tracing::error!(trigger, "Failed to rebuild route table: {}. Keeping current routes.", e);
        }
    }
}

/// A watcher that rebuilds the route table when the routes directory changes.
pub struct RoutesWatcher {
    builder: RouteTableBuilder,
    update_tx: mpsc::UnboundedSender<RouteTable>,
}

impl RoutesWatcher {
    /// Create a new RoutesWatcher.
    ///
    /// Returns the watcher and a receiver for rebuilt tables.
    pub fn new(builder: RouteTableBuilder) -> (Self, mpsc::UnboundedReceiver<RouteTable>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        (Self { builder, update_tx }, update_rx)
    }

    /// Publish rebuilt tables on an existing channel instead.
    pub fn with_sender(builder: RouteTableBuilder, update_tx: mpsc::UnboundedSender<RouteTable>) -> Self {
        Self { builder, update_tx }
    }

    /// Start watching in a background thread.
    ///
    /// The returned handle must be kept alive for as long as watching should
    /// continue.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let root = self.builder.root().to_path_buf();
        let builder = self.builder;
        let tx = self.update_tx;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() || event.kind.is_remove() {
                        tracing::debug!(paths = ?event.paths, "Routes directory change detected");
                        rebuild_and_publish(&builder, &tx, "watch");
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&root, RecursiveMode::Recursive)?;

        tracing::info!(path = ?root, "Routes watcher started");
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoutesConfig;
    use crate::route::RouteRegistry;
    use tempfile::TempDir;

    #[test]
    fn test_failed_rebuild_publishes_nothing() {
        let dir = TempDir::new().unwrap();
        let options = RoutesConfig {
            path: dir.path().join("gone"),
            ..RoutesConfig::default()
        };
        let (watcher, mut rx) = RoutesWatcher::new(RouteTableBuilder::new(options, RouteRegistry::new()));

        rebuild_and_publish(&watcher.builder, &watcher.update_tx, "test");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_successful_rebuild_is_published() {
        let dir = TempDir::new().unwrap();
        let options = RoutesConfig {
            path: dir.path().to_path_buf(),
            ..RoutesConfig::default()
        };
        let (watcher, mut rx) = RoutesWatcher::new(RouteTableBuilder::new(options, RouteRegistry::new()));

        rebuild_and_publish(&watcher.builder, &watcher.update_tx, "test");
        assert!(rx.try_recv().unwrap().is_empty());
    }
}
