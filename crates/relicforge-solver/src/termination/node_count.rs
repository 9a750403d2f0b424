//! Node-count-based termination.

use super::Termination;
use crate::stats::SearchStats;

/// Terminates once the search has entered `limit` trie nodes.
#[derive(Debug, Clone, Copy)]
pub struct NodeCountTermination {
    limit: u64,
}

impl NodeCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for NodeCountTermination {
    fn is_terminated(&self, stats: &SearchStats) -> bool {
        stats.nodes_visited >= self.limit
    }
}
