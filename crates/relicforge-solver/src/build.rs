//! Search results.

use std::collections::BTreeSet;

use relicforge_core::Effect;
use smallvec::SmallVec;

/// One vessel slot of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    /// Index of the relic in the caller's input list.
    Filled(usize),
    /// A wildcard slot no unused relic could fill.
    Empty,
}

impl Slot {
    pub fn relic_index(self) -> Option<usize> {
        match self {
            Slot::Filled(index) => Some(index),
            Slot::Empty => None,
        }
    }
}

/// Inline storage for a vessel's slots.
pub type Slots = SmallVec<[Slot; 6]>;

/// A complete assignment of relics to one vessel's slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Build {
    pub vessel_name: String,
    pub slots: Slots,
    pub score: i64,
    pub active_effects: Vec<Effect>,
}

impl Build {
    /// Relic indices of the filled slots, in slot order.
    pub fn relic_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().filter_map(|slot| slot.relic_index())
    }

    pub fn has_empty_slots(&self) -> bool {
        self.slots.contains(&Slot::Empty)
    }

    /// Identity used to drop duplicate builds.
    ///
    /// Slot order is not part of it: two builds using the same relics and
    /// yielding the same effects at the same score are the same result.
    pub fn signature(&self) -> BuildSignature {
        BuildSignature {
            score: self.score,
            slots: self.slots.iter().copied().collect(),
            effects: self.active_effects.iter().cloned().collect(),
        }
    }
}

/// Order-insensitive build identity: score, slot contents and active effects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildSignature {
    score: i64,
    slots: BTreeSet<Slot>,
    effects: BTreeSet<Effect>,
}
