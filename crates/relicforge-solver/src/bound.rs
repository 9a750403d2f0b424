//! Score bounders for branch-and-bound pruning.
//!
//! Bounders estimate the best additional score obtainable below a trie node.
//! If the running score plus this optimistic bound cannot reach the current
//! acceptance bar, the subtree is skipped.

use std::fmt::Debug;

use relicforge_core::VesselTree;

use crate::candidates::CandidatePool;

/// Calculates optimistic score bounds for pruning.
pub trait ScoreBounder: Send + Sync + Debug {
    /// Upper bound on the score the unused candidates can still add below
    /// `node`.
    ///
    /// The bound must never underestimate. Returns `None` if no bound can be
    /// computed, which disables pruning at `node`.
    fn optimistic_bound(&self, node: &VesselTree, pool: &CandidatePool, used: &[bool])
        -> Option<i64>;
}

/// Per-level best-candidate bound.
///
/// Walks the subtree level by level up to its remaining depth. At each level
/// it takes the best stand-alone score of any unused candidate matching any
/// edge on that level, and sums these maxima. Conflicts between levels are
/// ignored, so the same relic may be counted on several levels.
///
/// Sound when scores are non-negative: a relic never adds more to a build
/// than it scores alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathBounder;

impl PathBounder {
    pub fn new() -> Self {
        Self
    }
}

impl ScoreBounder for PathBounder {
    fn optimistic_bound(
        &self,
        node: &VesselTree,
        pool: &CandidatePool,
        used: &[bool],
    ) -> Option<i64> {
        let mut total = 0;
        let mut level: Vec<&VesselTree> = vec![node];
        let mut next: Vec<&VesselTree> = Vec::new();

        for _ in 0..node.remaining_depth() {
            let mut step_best = 0;
            for parent in &level {
                for (requirement, child) in parent.children() {
                    step_best = step_best.max(pool.best_unused(requirement, used));
                    next.push(child);
                }
            }
            if next.is_empty() {
                break;
            }
            total += step_best;
            std::mem::swap(&mut level, &mut next);
            next.clear();
        }
        Some(total)
    }
}

/// A bounder that never bounds; disables pruning.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBounder;

impl ScoreBounder for NoBounder {
    fn optimistic_bound(&self, _node: &VesselTree, _pool: &CandidatePool, _used: &[bool]) -> Option<i64> {
        None
    }
}
