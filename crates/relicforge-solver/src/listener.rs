//! Progress side channel for a running search.
//!
//! Listeners observe the search; nothing they do can change its result.

use std::sync::atomic::{AtomicU64, Ordering};

/// Receives search progress notifications.
///
/// All methods have empty default implementations.
pub trait SearchListener {
    /// Called once per trie edge the search expands.
    fn on_edge_visited(&self) {}

    /// Called when the result heap retains a build.
    fn on_build_accepted(&self, _vessel: &str, _score: i64) {}
}

/// Ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl SearchListener for NoopListener {}

// A plain closure is an edge counter.
impl<F: Fn()> SearchListener for F {
    fn on_edge_visited(&self) {
        self()
    }
}

/// Counts notifications with atomics, so another thread can poll progress.
///
/// # Example
///
/// ```
/// use relicforge_solver::{CountingListener, SearchListener};
///
/// let listener = CountingListener::new();
/// listener.on_edge_visited();
/// listener.on_build_accepted("Urn", 10);
///
/// assert_eq!(listener.edges_visited(), 1);
/// assert_eq!(listener.builds_accepted(), 1);
/// ```
#[derive(Debug, Default)]
pub struct CountingListener {
    edges_visited: AtomicU64,
    builds_accepted: AtomicU64,
}

impl CountingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edges_visited(&self) -> u64 {
        self.edges_visited.load(Ordering::Relaxed)
    }

    pub fn builds_accepted(&self) -> u64 {
        self.builds_accepted.load(Ordering::Relaxed)
    }
}

impl SearchListener for CountingListener {
    fn on_edge_visited(&self) {
        self.edges_visited.fetch_add(1, Ordering::Relaxed);
    }

    fn on_build_accepted(&self, _vessel: &str, _score: i64) {
        self.builds_accepted.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_closure_counts_edges() {
        let edges = Cell::new(0);
        let listener = || edges.set(edges.get() + 1);
        listener.on_edge_visited();
        listener.on_edge_visited();
        listener.on_build_accepted("Urn", 5);
        assert_eq!(edges.get(), 2);
    }
}
