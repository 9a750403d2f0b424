//! Shared test fixtures for RelicForge crates.
//!
//! This crate provides relic pools, score tables and vessel trees for
//! testing. It depends only on `relicforge-core` to avoid circular
//! dependencies.
//!
//! - [`relics`] - hand-written relics and the three-relic Vigor scenario
//! - [`random`] - seeded random relic pools and score tables
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! relicforge-test = { workspace = true }
//! ```
//!
//! ```ignore
//! use relicforge_test::relics::vigor_scenario;
//! use relicforge_test::random::RandomPool;
//! ```

pub mod random;
pub mod relics;

pub use random::RandomPool;
pub use relics::{relic, stacking_vigor, vigor_scenario, VigorScenario};
