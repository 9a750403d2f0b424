//! Seeded random inputs for property tests.
//!
//! The vocabulary is small so that duplicates, stacking and exclusivity
//! conflicts show up often in pools of a dozen relics.
//!
//! # Example
//!
//! ```
//! use relicforge_test::RandomPool;
//!
//! let mut pool = RandomPool::new(7);
//! let relics = pool.relics(12);
//! let table = pool.table();
//! let tree = pool.tree(4, 3);
//!
//! assert_eq!(relics.len(), 12);
//! assert!(!table.has_negative_scores());
//! assert!(tree.remaining_depth() <= 3);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use relicforge_core::{
    Color, Effect, EffectClassifier, Relic, ScoreTable, SlotRequirement, VesselTree,
};

const EFFECT_NAMES: [&str; 8] = [
    "Vigor",
    "Mind",
    "Improved Sorcery",
    "Improved Incantations",
    "Starting armament deals frost",
    "Starting armament deals fire",
    "Changes compatible armament's skill to Glintblade Phalanx",
    "Changes compatible armament's skill to Gravity Bolt",
];

const SLOT_COLORS: [Color; 4] = [Color::Red, Color::Blue, Color::Yellow, Color::Green];

/// Deterministic generator of relics, score tables and vessel trees.
pub struct RandomPool {
    rng: StdRng,
    classifier: EffectClassifier,
}

impl RandomPool {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            classifier: EffectClassifier::default(),
        }
    }

    /// A classified effect drawn from the vocabulary, level 0 to 2.
    pub fn effect(&mut self) -> Effect {
        let name = EFFECT_NAMES[self.rng.random_range(0..EFFECT_NAMES.len())];
        let level = self.rng.random_range(0..=2);
        self.classifier.classify(name, level)
    }

    /// A relic color; roughly one in five is deep.
    pub fn color(&mut self) -> Color {
        let base = SLOT_COLORS[self.rng.random_range(0..SLOT_COLORS.len())];
        if self.rng.random_bool(0.2) {
            base.deep()
        } else {
            base
        }
    }

    /// One to three effects, occasionally followed by a curse.
    pub fn relic(&mut self, name: String) -> Relic {
        let color = self.color();
        let effect_count = self.rng.random_range(1..=3);
        let effects = (0..effect_count).map(|_| self.effect()).collect();
        let relic = Relic::new(name, color, effects);
        if self.rng.random_bool(0.25) {
            let curse = self.effect();
            relic.with_curses(vec![curse])
        } else {
            relic
        }
    }

    pub fn relics(&mut self, count: usize) -> Vec<Relic> {
        (0..count).map(|i| self.relic(format!("Relic {i}"))).collect()
    }

    /// Non-negative scores mixing bare, `+N` and `+*` keys.
    pub fn table(&mut self) -> ScoreTable {
        let mut table = ScoreTable::new();
        for name in EFFECT_NAMES {
            let key = name.to_lowercase();
            table.insert(&key, self.rng.random_range(0..=20));
            if self.rng.random_bool(0.3) {
                table.insert(&format!("{key} +*"), self.rng.random_range(0..=30));
            }
            if self.rng.random_bool(0.3) {
                let level = self.rng.random_range(0..=2);
                table.insert(&format!("{key} +{level}"), self.rng.random_range(0..=40));
            }
        }
        table
    }

    /// A slot requirement; roughly one in four is the wildcard.
    pub fn requirement(&mut self) -> SlotRequirement {
        if self.rng.random_bool(0.25) {
            SlotRequirement::Any
        } else {
            SlotRequirement::Color(self.color())
        }
    }

    /// `vessels` patterns, each of length `depth`.
    pub fn tree(&mut self, vessels: usize, depth: usize) -> VesselTree {
        let mut tree = VesselTree::new();
        for i in 0..vessels {
            let slots: Vec<SlotRequirement> = (0..depth).map(|_| self.requirement()).collect();
            tree.insert(format!("Vessel {i}"), &slots);
        }
        tree
    }
}
