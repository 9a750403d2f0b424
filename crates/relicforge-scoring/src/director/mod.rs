//! Score directors.
//!
//! A score director applies relics one at a time and can roll back to an
//! earlier checkpoint. The search drives one director per call.
//!
//! # Director Types
//!
//! - [`IncrementalScorer`] - change-log based, O(effects) push and undo
//! - [`SimpleScorer`] - rescans every pushed relic (baseline)

mod incremental;
mod simple;
mod traits;


pub use incremental::{IncrementalScorer, ScorerSnapshot};
pub use simple::SimpleScorer;
pub use traits::{Checkpoint, ScoreDirector};
