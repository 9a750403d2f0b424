//! RelicForge Core - relic model, score lookup and vessel patterns
//!
//! This crate provides the fundamental value types the search works on:
//! - [`Color`] and [`SlotRequirement`] for matching relics to vessel slots
//! - [`Effect`] and [`Relic`], immutable once constructed
//! - [`EffectClassifier`] for deriving stacking and exclusivity from names
//! - [`ScoreTable`] for resolving an effect's score
//! - [`VesselTree`], the slot-pattern trie shared by every search

pub mod error;
pub mod model;
pub mod score_table;
pub mod vessel;

pub use error::{RelicForgeError, Result};
pub use model::{Color, Effect, EffectClassifier, ExclusiveTag, MatchRule, Relic, SlotRequirement};
pub use score_table::ScoreTable;
pub use vessel::VesselTree;
