//! Vessel slot patterns.
//!
//! A vessel is a named, fixed-length sequence of [`SlotRequirement`]s. All
//! vessels available to a build class are folded into one [`VesselTree`], a
//! trie the search walks edge by edge.
//!
//! [`SlotRequirement`]: crate::SlotRequirement

mod tree;

pub use tree::VesselTree;
