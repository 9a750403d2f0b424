//! Termination conditions for a running search.
//!
//! Checked cooperatively at the top of every trie node. A terminated search
//! keeps the builds it has collected so far.

mod composite;
mod external;
mod node_count;
mod time;

use std::fmt::Debug;

use crate::stats::SearchStats;

pub use composite::OrTermination;
pub use external::ExternalTermination;
pub use node_count::NodeCountTermination;
pub use time::TimeTermination;

/// Trait for determining when to stop searching.
pub trait Termination: Send + Sync + Debug {
    /// Returns true if the search should stop.
    fn is_terminated(&self, stats: &SearchStats) -> bool;
}

/// Runs to completion.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverTermination;

impl Termination for NeverTermination {
    fn is_terminated(&self, _stats: &SearchStats) -> bool {
        false
    }
}

// An absent limit never fires, so optional config limits compose directly.
impl<T: Termination> Termination for Option<T> {
    fn is_terminated(&self, stats: &SearchStats) -> bool {
        self.as_ref().is_some_and(|t| t.is_terminated(stats))
    }
}

impl<T: Termination + ?Sized> Termination for &T {
    fn is_terminated(&self, stats: &SearchStats) -> bool {
        (**self).is_terminated(stats)
    }
}

#[cfg(test)]
mod tests;
