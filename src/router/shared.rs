//! Atomically published route table snapshots.
//!
//! Serving threads read the current [`RouteTable`] through an [`ArcSwap`]
//! without taking a lock. Writers are serialized by a mutex: each update
//! clones the live table, applies the change to the clone, then swaps the
//! finished table in, so a reader only ever sees a complete table.

use arc_swap::ArcSwap;
use std::sync::{Arc, Mutex};
use tracing::info;

use super::core::{Params, RouteTable};

/// A [`RouteTable`] shared between one writer at a time and many readers.
pub struct SharedRouteTable<H> {
    current: ArcSwap<RouteTable<H>>,
    writer: Mutex<()>,
}

impl<H> SharedRouteTable<H> {
    #[must_use]
    pub fn new(table: RouteTable<H>) -> Self {
        Self {
            current: ArcSwap::from_pointee(table),
            writer: Mutex::new(()),
        }
    }

    /// The current snapshot. Holding it keeps that version alive even if a
    /// newer table is published meanwhile.
    #[must_use]
    pub fn load(&self) -> Arc<RouteTable<H>> {
        self.current.load_full()
    }

    /// Replace the whole table.
    pub fn publish(&self, table: RouteTable<H>) {
        let _guard = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        info!(routes_count = table.len(), "Publishing route table");
        self.current.store(Arc::new(table));
    }
}

impl<H: Clone> SharedRouteTable<H> {
    /// Register a route on a copy of the live table and publish the copy.
    pub fn register(&self, method: &str, pattern: &str, handler: H) {
        let _guard = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        let mut next = RouteTable::clone(&self.current.load());
        next.register(method, pattern, handler);
        self.current.store(Arc::new(next));
    }

    /// Resolve against the current snapshot, returning owned values so the
    /// snapshot need not outlive the call.
    #[must_use]
    pub fn resolve_owned(&self, method: &str, path: &str) -> Option<(H, String, Params)> {
        let table = self.current.load();
        table
            .resolve(method, path)
            .map(|m| (m.handler.clone(), m.pattern.to_string(), m.params))
    }
}

impl<H> From<RouteTable<H>> for SharedRouteTable<H> {
    fn from(table: RouteTable<H>) -> Self {
        Self::new(table)
    }
}
