//! Pure scoring function.

use std::collections::HashSet;

use relicforge_core::{Effect, ExclusiveTag, ScoreTable};

/// The effects left in force after stacking and exclusivity rules, and
/// their summed score.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScoredEffects<'a> {
    pub active_effects: Vec<&'a Effect>,
    pub score: i64,
}

/// Scores an ordered effect sequence.
///
/// Effects are processed in order. A non-stackable effect whose
/// `(name, level)` was already seen is dropped, as is any effect whose
/// exclusivity tag an earlier active effect already took. Every surviving
/// effect is active, including those the table scores at zero.
///
/// # Examples
///
/// ```
/// use relicforge_core::{Effect, ScoreTable};
/// use relicforge_scoring::score_effects;
///
/// let table: ScoreTable = [("vigor", 10)].into_iter().collect();
/// let effects = [Effect::new("Vigor", 0), Effect::new("Vigor", 0), Effect::new("Mind", 0)];
///
/// let scored = score_effects(&effects, &table);
/// assert_eq!(scored.score, 10);
/// assert_eq!(scored.active_effects.len(), 2);
/// ```
pub fn score_effects<'a, I>(effects: I, table: &ScoreTable) -> ScoredEffects<'a>
where
    I: IntoIterator<Item = &'a Effect>,
{
    let mut seen: HashSet<(&str, u32)> = HashSet::new();
    let mut exclusive_taken: HashSet<&ExclusiveTag> = HashSet::new();
    let mut scored = ScoredEffects::default();

    for effect in effects {
        let seen_key = (effect.name(), effect.level());
        if !effect.is_stackable() && seen.contains(&seen_key) {
            continue;
        }
        if let Some(tag) = effect.exclusive() {
            if !exclusive_taken.insert(tag) {
                continue;
            }
        }
        if !effect.is_stackable() {
            seen.insert(seen_key);
        }
        scored.score += table.score_of(effect);
        scored.active_effects.push(effect);
    }
    scored
}
