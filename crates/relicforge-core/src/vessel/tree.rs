//! Slot-pattern trie.

use std::collections::BTreeMap;

use crate::model::SlotRequirement;

/// Prefix tree over slot requirements.
///
/// Each node may carry the name of the vessel whose pattern ends there.
/// Children iterate in [`SlotRequirement`] order: concrete colors by name,
/// then the wildcard. Every node also records the length of the longest
/// path below it, which the search uses to size its bounds.
///
/// # Examples
///
/// ```
/// use relicforge_core::{Color, SlotRequirement, VesselTree};
///
/// let mut tree = VesselTree::new();
/// tree.insert("Chalice", &[Color::Red.into(), Color::Red.into(), SlotRequirement::Any]);
/// tree.insert("Urn", &[Color::Red.into(), Color::Green.into(), Color::Green.into()]);
///
/// assert_eq!(tree.remaining_depth(), 3);
/// assert_eq!(tree.vessel_count(), 2);
///
/// let red = tree.child(Color::Red.into()).unwrap();
/// let edges: Vec<SlotRequirement> = red.children().map(|(req, _)| req).collect();
/// assert_eq!(edges, vec![Color::Green.into(), Color::Red.into()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VesselTree {
    name: Option<String>,
    next: BTreeMap<SlotRequirement, VesselTree>,
    depth: usize,
}

impl VesselTree {
    /// Creates an empty root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree from `(vessel name, slot pattern)` pairs.
    pub fn from_patterns<I, N, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: AsRef<[SlotRequirement]>,
    {
        let mut tree = Self::new();
        for (name, slots) in patterns {
            tree.insert(name, slots.as_ref());
        }
        tree
    }

    /// Inserts the path `slots` and names its terminal node.
    ///
    /// Inserting a second vessel over an identical path renames the node.
    pub fn insert(&mut self, name: impl Into<String>, slots: &[SlotRequirement]) {
        self.depth = self.depth.max(slots.len());
        match slots.split_first() {
            None => self.name = Some(name.into()),
            Some((first, rest)) => self.next.entry(*first).or_default().insert(name, rest),
        }
    }

    /// The vessel completed at this node, if any.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Outgoing edges in search order.
    pub fn children(&self) -> impl Iterator<Item = (SlotRequirement, &VesselTree)> {
        self.next.iter().map(|(req, child)| (*req, child))
    }

    pub fn child(&self, requirement: SlotRequirement) -> Option<&VesselTree> {
        self.next.get(&requirement)
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.next.is_empty()
    }

    /// Length of the longest path from this node to a leaf.
    #[inline]
    pub fn remaining_depth(&self) -> usize {
        self.depth
    }

    /// Number of named nodes in this subtree.
    pub fn vessel_count(&self) -> usize {
        usize::from(self.name.is_some())
            + self.next.values().map(VesselTree::vessel_count).sum::<usize>()
    }

    /// Every `(vessel name, slot pattern)` in this subtree, in search order.
    pub fn patterns(&self) -> Vec<(String, Vec<SlotRequirement>)> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        self.collect_patterns(&mut path, &mut out);
        out
    }

    fn collect_patterns(
        &self,
        path: &mut Vec<SlotRequirement>,
        out: &mut Vec<(String, Vec<SlotRequirement>)>,
    ) {
        if let Some(name) = &self.name {
            out.push((name.clone(), path.clone()));
        }
        for (req, child) in &self.next {
            path.push(*req);
            child.collect_patterns(path, out);
            path.pop();
        }
    }
}
