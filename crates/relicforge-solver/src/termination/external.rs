//! Cancellation from another thread.

use std::sync::atomic::{AtomicBool, Ordering};

use super::Termination;
use crate::stats::SearchStats;

/// Stops the search when a shared cancel flag is raised.
///
/// The flag is read at every trie node, so a search stops within one node
/// of the store.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use relicforge_solver::termination::{ExternalTermination, Termination};
/// use relicforge_solver::SearchStats;
///
/// let cancel = AtomicBool::new(false);
/// let stop = ExternalTermination::new(&cancel);
/// assert!(!stop.is_terminated(&SearchStats::default()));
///
/// cancel.store(true, Ordering::SeqCst);
/// assert!(stop.is_terminated(&SearchStats::default()));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ExternalTermination<'a> {
    cancel: &'a AtomicBool,
}

impl<'a> ExternalTermination<'a> {
    pub fn new(cancel: &'a AtomicBool) -> Self {
        Self { cancel }
    }
}

impl Termination for ExternalTermination<'_> {
    fn is_terminated(&self, _stats: &SearchStats) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}
