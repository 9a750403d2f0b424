//! Simple score director with full recalculation.

use relicforge_core::{Effect, Relic, ScoreTable};

use super::traits::{Checkpoint, ScoreDirector};
use crate::scored::{score_effects, ScoredEffects};

/// A score director that rescans every pushed relic after each change.
///
/// This is inefficient but obviously correct. Used as the reference the
/// incremental director is checked against.
#[derive(Debug, Clone)]
pub struct SimpleScorer<'a> {
    table: &'a ScoreTable,
    relics: Vec<&'a Relic>,
    scored: ScoredEffects<'a>,
}

impl<'a> SimpleScorer<'a> {
    pub fn new(table: &'a ScoreTable) -> Self {
        Self {
            table,
            relics: Vec::new(),
            scored: ScoredEffects::default(),
        }
    }

    /// Relics pushed so far, in order.
    pub fn relics(&self) -> &[&'a Relic] {
        &self.relics
    }

    fn recalculate(&mut self) {
        self.scored = score_effects(
            self.relics.iter().flat_map(|&relic| relic.effects_and_curses()),
            self.table,
        );
    }
}

impl<'a> ScoreDirector<'a> for SimpleScorer<'a> {
    fn push_relic(&mut self, relic: &'a Relic) -> i64 {
        let before = self.scored.score;
        self.relics.push(relic);
        self.recalculate();
        self.scored.score - before
    }

    fn push_context(&mut self) -> Checkpoint {
        Checkpoint(self.relics.len())
    }

    fn pop_context(&mut self, checkpoint: Checkpoint) {
        self.relics.truncate(checkpoint.0);
        self.recalculate();
    }

    fn current_score(&self) -> i64 {
        self.scored.score
    }

    fn active_effects(&self) -> &[&'a Effect] {
        &self.scored.active_effects
    }
}
