// Incremental score director with a reversible change log.
//
// Every state edit made by `push_relic` is appended to the log as its own
// entry. `pop_context` pops entries back to a checkpoint and reverses each
// one, so backtracking costs O(entries since the checkpoint):
//
// ```text
// let checkpoint = scorer.push_context();
// scorer.push_relic(relic);   // logs Seen / ExclusiveFlag / Score / PushEffect
// search(child);
// scorer.pop_context(checkpoint);
// ```

use std::collections::HashSet;

use relicforge_core::{Effect, ExclusiveTag, Relic, ScoreTable};

use super::traits::{Checkpoint, ScoreDirector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Change<'a> {
    Score(i64),
    Seen((&'a str, u32)),
    ExclusiveFlag(&'a ExclusiveTag),
    PushEffect,
}

/// Running evaluation of one search path.
///
/// Borrows the score table and the relics pushed onto it; nothing is cloned
/// on the hot path.
///
/// # Example
///
/// ```
/// use relicforge_core::{Color, Effect, Relic, ScoreTable};
/// use relicforge_scoring::{IncrementalScorer, ScoreDirector};
///
/// let table: ScoreTable = [("vigor", 10)].into_iter().collect();
/// let relic = Relic::new("Scene", Color::Red, vec![Effect::new("Vigor", 0)]);
///
/// let mut scorer = IncrementalScorer::new(&table);
/// let checkpoint = scorer.push_context();
/// assert_eq!(scorer.push_relic(&relic), 10);
/// assert_eq!(scorer.push_relic(&relic), 0);
///
/// scorer.pop_context(checkpoint);
/// assert_eq!(scorer.current_score(), 0);
/// assert!(scorer.active_effects().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct IncrementalScorer<'a> {
    table: &'a ScoreTable,
    current_score: i64,
    seen_keys: HashSet<(&'a str, u32)>,
    exclusive_taken: HashSet<&'a ExclusiveTag>,
    active_effects: Vec<&'a Effect>,
    change_log: Vec<Change<'a>>,
}

impl<'a> IncrementalScorer<'a> {
    pub fn new(table: &'a ScoreTable) -> Self {
        Self {
            table,
            current_score: 0,
            seen_keys: HashSet::new(),
            exclusive_taken: HashSet::new(),
            active_effects: Vec::with_capacity(32),
            change_log: Vec::with_capacity(128),
        }
    }

    pub fn score_table(&self) -> &'a ScoreTable {
        self.table
    }

    /// Returns true if a non-stackable `(name, level)` was already counted.
    pub fn is_seen(&self, name: &str, level: u32) -> bool {
        self.seen_keys.contains(&(name, level))
    }

    /// Returns true if an active effect holds `tag`.
    pub fn is_exclusive_taken(&self, tag: &ExclusiveTag) -> bool {
        self.exclusive_taken.contains(tag)
    }

    /// Number of entries in the change log.
    pub fn change_count(&self) -> usize {
        self.change_log.len()
    }

    /// Captures the full observable state, with sets in sorted order.
    pub fn snapshot(&self) -> ScorerSnapshot {
        let mut seen_keys: Vec<(String, u32)> = self
            .seen_keys
            .iter()
            .map(|&(name, level)| (name.to_string(), level))
            .collect();
        seen_keys.sort();
        let mut exclusive_taken: Vec<String> = self
            .exclusive_taken
            .iter()
            .map(|tag| tag.as_str().to_string())
            .collect();
        exclusive_taken.sort();
        ScorerSnapshot {
            current_score: self.current_score,
            seen_keys,
            exclusive_taken,
            active_effects: self.active_effects.iter().map(|e| (*e).clone()).collect(),
        }
    }

    fn apply(&mut self, effect: &'a Effect) -> i64 {
        let seen_key = (effect.name(), effect.level());
        if !effect.is_stackable() && self.seen_keys.contains(&seen_key) {
            return 0;
        }
        if let Some(tag) = effect.exclusive() {
            if self.exclusive_taken.contains(tag) {
                return 0;
            }
        }

        if !effect.is_stackable() {
            self.seen_keys.insert(seen_key);
            self.change_log.push(Change::Seen(seen_key));
        }
        if let Some(tag) = effect.exclusive() {
            self.exclusive_taken.insert(tag);
            self.change_log.push(Change::ExclusiveFlag(tag));
        }

        let score = self.table.score_of(effect);
        if score != 0 {
            self.current_score += score;
            self.change_log.push(Change::Score(score));
        }

        // Zero-score effects stay active: they still block later duplicates.
        self.active_effects.push(effect);
        self.change_log.push(Change::PushEffect);
        score
    }
}

impl<'a> ScoreDirector<'a> for IncrementalScorer<'a> {
    fn push_relic(&mut self, relic: &'a Relic) -> i64 {
        relic
            .effects_and_curses()
            .map(|effect| self.apply(effect))
            .sum()
    }

    fn push_context(&mut self) -> Checkpoint {
        Checkpoint(self.change_log.len())
    }

    fn pop_context(&mut self, checkpoint: Checkpoint) {
        debug_assert!(
            checkpoint.0 <= self.change_log.len(),
            "checkpoint {} is ahead of the change log ({})",
            checkpoint.0,
            self.change_log.len()
        );
        while self.change_log.len() > checkpoint.0 {
            match self.change_log.pop() {
                Some(Change::Score(score)) => self.current_score -= score,
                Some(Change::Seen(key)) => {
                    self.seen_keys.remove(&key);
                }
                Some(Change::ExclusiveFlag(tag)) => {
                    self.exclusive_taken.remove(tag);
                }
                Some(Change::PushEffect) => {
                    self.active_effects.pop();
                }
                None => break,
            }
        }
    }

    #[inline]
    fn current_score(&self) -> i64 {
        self.current_score
    }

    #[inline]
    fn active_effects(&self) -> &[&'a Effect] {
        &self.active_effects
    }
}

/// Owned copy of an [`IncrementalScorer`]'s state, comparable with `==`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScorerSnapshot {
    pub current_score: i64,
    pub seen_keys: Vec<(String, u32)>,
    pub exclusive_taken: Vec<String>,
    pub active_effects: Vec<Effect>,
}
