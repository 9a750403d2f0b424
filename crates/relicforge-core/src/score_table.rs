//! Effect score lookup.
//!
//! Keys are lower-cased effect names, optionally qualified with a level:
//! `"name +N"` scores exactly level `N`, `"name +*"` scores every level.
//! Lookup order for an effect of level `L`:
//!
//! 1. exact `"name +L"`; at level 0 the bare `"name"` comes first, since
//!    that is the effect's qualified name, and `"name +0"` follows
//! 2. `"name +*"`
//! 3. bare `"name"`, multiplied by `L + 1`
//! 4. zero

use std::collections::HashMap;

use crate::model::Effect;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct NameScores {
    base: Option<i64>,
    any_level: Option<i64>,
    levels: HashMap<u32, i64>,
}

/// Read-only map from effect name to integer score.
///
/// Qualified keys are split at construction so that [`ScoreTable::score_of`]
/// is a single hash lookup on the effect's pre-lowered name.
///
/// # Examples
///
/// ```
/// use relicforge_core::{Effect, ScoreTable};
///
/// let table: ScoreTable = [("vigor", 10), ("vigor +2", 25), ("mind +*", 7)]
///     .into_iter()
///     .collect();
///
/// assert_eq!(table.score_of(&Effect::new("Vigor", 0)), 10);
/// assert_eq!(table.score_of(&Effect::new("Vigor", 1)), 20);
/// assert_eq!(table.score_of(&Effect::new("Vigor", 2)), 25);
/// assert_eq!(table.score_of(&Effect::new("Mind", 3)), 7);
/// assert_eq!(table.score_of(&Effect::new("Endurance", 1)), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTable {
    entries: HashMap<String, NameScores>,
    len: usize,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the score for `key`.
    ///
    /// The key is trimmed and lower-cased. A trailing `+N` or `+*` qualifies
    /// the key by level; any other suffix is part of the name.
    pub fn insert(&mut self, key: &str, score: i64) {
        let key = key.trim().to_lowercase();
        let (name, qualifier) = split_qualifier(&key);
        let entry = self.entries.entry(name.to_string()).or_default();
        let previous = match qualifier {
            Qualifier::Bare => entry.base.replace(score),
            Qualifier::AnyLevel => entry.any_level.replace(score),
            Qualifier::Level(level) => entry.levels.insert(level, score),
        };
        if previous.is_none() {
            self.len += 1;
        }
    }

    /// Number of keys in the table.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if any key carries a negative score.
    ///
    /// Optimistic pruning bounds assume non-negative contributions.
    pub fn has_negative_scores(&self) -> bool {
        self.entries.values().any(|scores| {
            scores.base.is_some_and(|s| s < 0)
                || scores.any_level.is_some_and(|s| s < 0)
                || scores.levels.values().any(|&s| s < 0)
        })
    }

    /// Resolves the score of one effect instance.
    pub fn score_of(&self, effect: &Effect) -> i64 {
        let Some(scores) = self.entries.get(effect.key()) else {
            return 0;
        };
        let level = effect.level();
        if level == 0 {
            if let Some(base) = scores.base {
                return base;
            }
        }
        if let Some(&score) = scores.levels.get(&level) {
            return score;
        }
        if let Some(score) = scores.any_level {
            return score;
        }
        scores
            .base
            .map_or(0, |base| base.saturating_mul(i64::from(level) + 1))
    }
}

impl<K: AsRef<str>> FromIterator<(K, i64)> for ScoreTable {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        let mut table = ScoreTable::new();
        table.extend(iter);
        table
    }
}

impl<K: AsRef<str>> Extend<(K, i64)> for ScoreTable {
    fn extend<I: IntoIterator<Item = (K, i64)>>(&mut self, iter: I) {
        for (key, score) in iter {
            self.insert(key.as_ref(), score);
        }
    }
}

enum Qualifier {
    Bare,
    AnyLevel,
    Level(u32),
}

fn split_qualifier(key: &str) -> (&str, Qualifier) {
    if let Some((name, suffix)) = key.rsplit_once(" +") {
        if suffix == "*" {
            return (name.trim_end(), Qualifier::AnyLevel);
        }
        if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(level) = suffix.parse() {
                return (name.trim_end(), Qualifier::Level(level));
            }
        }
    }
    (key, Qualifier::Bare)
}
