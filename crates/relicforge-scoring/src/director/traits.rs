// Score director trait definition.

use relicforge_core::{Effect, Relic};

/// Opaque rollback token returned by [`ScoreDirector::push_context`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Checkpoint(pub(crate) usize);

// The score director owns the running evaluation of one search path.
//
// It is responsible for:
// - Applying a relic's effects and curses in order
// - Tracking which effects are in force after stacking and exclusivity
// - Restoring an earlier state exactly on backtrack
pub trait ScoreDirector<'a> {
    // Applies every effect of `relic`; returns the score added.
    fn push_relic(&mut self, relic: &'a Relic) -> i64;

    // Marks the current state.
    fn push_context(&mut self) -> Checkpoint;

    // Restores the state captured by `checkpoint`.
    //
    // Checkpoints must be popped in reverse order of creation.
    fn pop_context(&mut self, checkpoint: Checkpoint);

    // Returns the running score.
    fn current_score(&self) -> i64;

    // Returns the effects currently in force, in application order.
    fn active_effects(&self) -> &[&'a Effect];
}
