//! RelicForge build search
//!
//! This crate finds the best relic builds for a set of vessels:
//! - [`BuildFinder`], the depth-first branch-and-bound search
//! - [`BuildHeap`], the bounded, deduplicating top-K collector
//! - Score bounders for pruning ([`PathBounder`], [`NoBounder`])
//! - Termination conditions and progress listeners
//! - [`search_classes_parallel`] for several vessel trees at once

pub mod bound;
pub mod build;
pub mod candidates;
pub mod collector;
pub mod finder;
pub mod listener;
pub mod parallel;
pub mod stats;
pub mod termination;

pub use bound::{NoBounder, PathBounder, ScoreBounder};
pub use build::{Build, BuildSignature, Slot, Slots};
pub use candidates::{Candidate, CandidatePool};
pub use collector::BuildHeap;
pub use finder::{BuildFinder, SearchLimits, SearchResult};
pub use listener::{CountingListener, NoopListener, SearchListener};
pub use parallel::search_classes_parallel;
pub use stats::SearchStats;
pub use termination::{
    ExternalTermination, NeverTermination, NodeCountTermination, OrTermination, Termination,
    TimeTermination,
};
