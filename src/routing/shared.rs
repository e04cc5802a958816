//! Atomically swappable route table.
//!
//! Each request takes one snapshot with [`SharedRouteTable::current`] and
//! dispatches against it to completion. A reload stores a whole new table;
//! requests already in flight keep the snapshot they started with.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::routing::table::RouteTable;

/// Shared handle to the live route table.
#[derive(Debug, Clone)]
pub struct SharedRouteTable {
    inner: Arc<ArcSwap<RouteTable>>,
}

impl SharedRouteTable {
    pub fn new(table: RouteTable) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(table)),
        }
    }

    /// Snapshot of the current table.
    pub fn current(&self) -> Arc<RouteTable> {
        self.inner.load_full()
    }

    /// Replace the table for all future requests.
    pub fn replace(&self, table: RouteTable) {
        let route_count = table.len();
        self.inner.store(Arc::new(table));
        tracing::info!(route_count, "Route table swapped");
    }
}
