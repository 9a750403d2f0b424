//! Search statistics.

use std::time::{Duration, Instant};

use serde::Serialize;

/// Counters for one search run.
///
/// # Example
///
/// ```
/// use relicforge_solver::SearchStats;
///
/// let mut stats = SearchStats::default();
/// stats.start();
/// stats.record_node();
/// stats.record_edge();
/// stats.record_build(true);
/// stats.record_build(false);
///
/// assert_eq!(stats.nodes_visited, 1);
/// assert_eq!(stats.builds_considered, 2);
/// assert_eq!(stats.builds_accepted, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    #[serde(skip)]
    start_time: Option<Instant>,
    /// Trie nodes entered.
    pub nodes_visited: u64,
    /// Trie edges expanded.
    pub edges_visited: u64,
    /// Complete builds offered to the result heap.
    pub builds_considered: u64,
    /// Builds the heap retained at the time they were offered.
    pub builds_accepted: u64,
    /// Subtrees skipped by the score bound.
    pub subtrees_pruned: u64,
    /// Whether a termination condition cut the search short.
    pub terminated_early: bool,
    /// Wall time of the run, set by [`SearchStats::finish`].
    pub elapsed_ms: u64,
}

impl SearchStats {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Time since [`SearchStats::start`], or zero if never started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    pub fn record_node(&mut self) {
        self.nodes_visited += 1;
    }

    pub fn record_edge(&mut self) {
        self.edges_visited += 1;
    }

    pub fn record_build(&mut self, accepted: bool) {
        self.builds_considered += 1;
        if accepted {
            self.builds_accepted += 1;
        }
    }

    pub fn record_prune(&mut self) {
        self.subtrees_pruned += 1;
    }

    /// Freezes the elapsed time.
    pub fn finish(&mut self) {
        self.elapsed_ms = u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX);
    }

    /// Adds the counters of another run.
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes_visited += other.nodes_visited;
        self.edges_visited += other.edges_visited;
        self.builds_considered += other.builds_considered;
        self.builds_accepted += other.builds_accepted;
        self.subtrees_pruned += other.subtrees_pruned;
        self.terminated_early |= other.terminated_early;
        self.elapsed_ms = self.elapsed_ms.max(other.elapsed_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unstarted_elapsed_is_zero() {
        let stats = SearchStats::default();
        assert_eq!(stats.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_merge() {
        let mut a = SearchStats {
            nodes_visited: 3,
            builds_considered: 2,
            elapsed_ms: 5,
            ..SearchStats::default()
        };
        let b = SearchStats {
            nodes_visited: 4,
            subtrees_pruned: 1,
            terminated_early: true,
            elapsed_ms: 9,
            ..SearchStats::default()
        };
        a.merge(&b);
        assert_eq!(a.nodes_visited, 7);
        assert_eq!(a.builds_considered, 2);
        assert_eq!(a.subtrees_pruned, 1);
        assert!(a.terminated_early);
        assert_eq!(a.elapsed_ms, 9);
    }
}
