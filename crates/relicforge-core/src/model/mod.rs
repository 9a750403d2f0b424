//! Relic domain model.
//!
//! All types here are plain immutable values. Effects are classified once,
//! when they are built from display names, so the search never inspects
//! names to decide stacking or exclusivity.

mod classify;
mod color;
mod effect;
mod relic;

pub use classify::{EffectClassifier, MatchRule};
pub use color::{Color, SlotRequirement};
pub use effect::{Effect, ExclusiveTag};
pub use relic::Relic;
