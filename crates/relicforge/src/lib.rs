//! RelicForge - best relic build search in Rust
//!
//! Load a score table and a vessel catalog, then ask for the best builds of a
//! class.
//!
//! # Example
//!
//! ```rust
//! use relicforge::prelude::*;
//!
//! let vigor = || vec![Effect::new("Vigor", 0).with_stackable(true)];
//! let relics = vec![
//!     Relic::new("A", Color::Red, vigor()),
//!     Relic::new("B", Color::Red, vigor()),
//!     Relic::new("C", Color::Blue, vigor()),
//! ];
//! let table: ScoreTable = [("vigor", 10)].into_iter().collect();
//! let tree = VesselTree::from_patterns([(
//!     "Vigor Vessel",
//!     [
//!         SlotRequirement::Color(Color::Red),
//!         SlotRequirement::Color(Color::Blue),
//!         SlotRequirement::Any,
//!     ],
//! )]);
//!
//! let result = run_search(&relics, &table, &tree, &SearchConfig::new().with_count(5)).unwrap();
//! assert_eq!(result.best_score(), Some(30));
//! ```

// Model
pub use relicforge_core::{
    Color, Effect, EffectClassifier, ExclusiveTag, MatchRule, Relic, RelicForgeError, Result,
    ScoreTable, SlotRequirement, VesselTree,
};

// Scoring
pub use relicforge_scoring::{score_effects, IncrementalScorer, ScoreDirector, ScoredEffects};

// Search
pub use relicforge_solver::{
    Build, BuildFinder, BuildHeap, CountingListener, ExternalTermination, NeverTermination,
    NoopListener, SearchLimits, SearchListener, SearchResult, SearchStats, Slot, Termination,
};

// Configuration
pub use relicforge_config::{
    builtin_score_table, builtin_score_table_names, load_score_table, parse_score_table,
    resolve_score_table, ConfigError, SearchConfig, VesselCatalog, VesselDefinition,
};

#[cfg(feature = "console")]
pub use relicforge_console as console;

mod search;
pub use search::{run_search, run_search_with, search_all_classes, search_class};

pub mod prelude {
    pub use super::{
        Build, Color, Effect, Relic, ScoreTable, SearchConfig, SearchResult, Slot,
        SlotRequirement, VesselCatalog, VesselTree,
    };
    pub use super::{run_search, search_class};
}
