//! Pre-filtered, score-ordered relic candidates.

use std::collections::HashMap;

use relicforge_core::{Color, Relic, ScoreTable, SlotRequirement};
use relicforge_scoring::score_effects;

/// A relic that survived pre-filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Index into the caller's relic list.
    pub index: usize,
    /// Score of the relic on its own.
    pub score: i64,
}

/// Search candidates indexed by slot requirement.
///
/// Positions refer to [`CandidatePool::candidates`]. Every index list is
/// sorted by descending stand-alone score, ties in input order, so the
/// first unused position of a list is its best available relic.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    candidates: Vec<Candidate>,
    by_color: HashMap<Color, Vec<usize>>,
    wildcard: Vec<usize>,
}

impl CandidatePool {
    /// Keeps complete relics whose stand-alone score reaches `prune`.
    pub fn new(relics: &[Relic], table: &ScoreTable, prune: i64) -> Self {
        let candidates: Vec<Candidate> = relics
            .iter()
            .enumerate()
            .filter(|(_, relic)| relic.is_complete())
            .map(|(index, relic)| Candidate {
                index,
                score: score_effects(relic.effects_and_curses(), table).score,
            })
            .filter(|candidate| candidate.score >= prune)
            .collect();

        let mut by_color: HashMap<Color, Vec<usize>> = HashMap::new();
        let mut wildcard = Vec::new();
        for (position, candidate) in candidates.iter().enumerate() {
            let color = relics[candidate.index].color();
            by_color.entry(color).or_default().push(position);
            if SlotRequirement::Any.admits(color) {
                wildcard.push(position);
            }
        }

        let by_score = |&position: &usize| std::cmp::Reverse(candidates[position].score);
        for positions in by_color.values_mut() {
            positions.sort_by_key(by_score);
        }
        wildcard.sort_by_key(by_score);

        Self {
            candidates,
            by_color,
            wildcard,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    #[inline]
    pub fn candidate(&self, position: usize) -> Candidate {
        self.candidates[position]
    }

    /// Positions that may fill a slot of `requirement`, best first.
    pub fn for_requirement(&self, requirement: SlotRequirement) -> &[usize] {
        match requirement {
            SlotRequirement::Color(color) => {
                self.by_color.get(&color).map(Vec::as_slice).unwrap_or(&[])
            }
            SlotRequirement::Any => &self.wildcard,
        }
    }

    /// Stand-alone score of the best unused candidate for `requirement`, or
    /// zero if none is left.
    pub fn best_unused(&self, requirement: SlotRequirement, used: &[bool]) -> i64 {
        self.for_requirement(requirement)
            .iter()
            .find(|&&position| !used[position])
            .map_or(0, |&position| self.candidates[position].score)
    }
}
