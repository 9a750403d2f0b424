//! Hand-written relic fixtures.
//!
//! # Example
//!
//! ```
//! use relicforge_test::relics::vigor_scenario;
//!
//! let scenario = vigor_scenario();
//! assert_eq!(scenario.relics.len(), 3);
//! assert_eq!(scenario.tree.remaining_depth(), 3);
//! ```

use relicforge_core::{Color, Effect, Relic, ScoreTable, SlotRequirement, VesselTree};

/// Creates a complete relic.
pub fn relic(name: &str, color: Color, effects: Vec<Effect>) -> Relic {
    Relic::new(name, color, effects)
}

/// A level-0 stackable Vigor effect.
pub fn stacking_vigor() -> Effect {
    Effect::new("Vigor", 0).with_stackable(true)
}

/// Inputs of the three-relic stacking Vigor scenario.
#[derive(Debug, Clone)]
pub struct VigorScenario {
    pub relics: Vec<Relic>,
    pub table: ScoreTable,
    pub tree: VesselTree,
}

/// Relics A (Red), B (Red) and C (Blue), each carrying one stacking Vigor;
/// table `{"vigor": 10}`; a single vessel requiring `(Red, Blue, Any)`.
pub fn vigor_scenario() -> VigorScenario {
    let relics = vec![
        relic("A", Color::Red, vec![stacking_vigor()]),
        relic("B", Color::Red, vec![stacking_vigor()]),
        relic("C", Color::Blue, vec![stacking_vigor()]),
    ];
    let table = [("vigor", 10)].into_iter().collect();
    let tree = VesselTree::from_patterns([(
        "Vigor Vessel",
        vec![
            SlotRequirement::Color(Color::Red),
            SlotRequirement::Color(Color::Blue),
            SlotRequirement::Any,
        ],
    )]);
    VigorScenario { relics, table, tree }
}
