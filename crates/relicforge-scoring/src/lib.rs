//! Order-aware relic scoring for RelicForge.
//!
//! This crate turns effect sequences into scores:
//! - [`score_effects`], the pure scoring function over an ordered effect list
//! - [`IncrementalScorer`], a push/undo score director for backtracking search
//! - [`SimpleScorer`], a full-rescan director used as the reference baseline
//!
//! Both directors implement [`ScoreDirector`], so tests can drive them with
//! the same sequence of pushes and checkpoints and compare results.

mod scored;

pub mod director;

pub use director::{Checkpoint, IncrementalScorer, ScoreDirector, ScorerSnapshot, SimpleScorer};
pub use scored::{score_effects, ScoredEffects};
