//! Relic value type.

use crate::error::{RelicForgeError, Result};

use super::color::Color;
use super::effect::Effect;

/// An item instance: a color plus an ordered list of effects.
///
/// Curses score exactly like effects but are kept apart for display. They are
/// applied after the effects, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relic {
    name: String,
    color: Color,
    size: usize,
    effects: Vec<Effect>,
    curses: Vec<Effect>,
    complete: bool,
}

impl Relic {
    /// Creates a complete relic whose declared size is its effect count.
    ///
    /// A relic of [`Color::Unknown`] starts out incomplete.
    pub fn new(name: impl Into<String>, color: Color, effects: Vec<Effect>) -> Self {
        Self {
            name: name.into(),
            color,
            size: effects.len(),
            effects,
            curses: Vec::new(),
            complete: color != Color::Unknown,
        }
    }

    pub fn with_curses(mut self, curses: Vec<Effect>) -> Self {
        self.curses = curses;
        self
    }

    /// Overrides the declared size (the slot count the database reports).
    pub fn with_declared_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Marks whether the relic was fully resolved against the database.
    pub fn with_complete(mut self, complete: bool) -> Self {
        self.complete = complete;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    #[inline]
    pub fn curses(&self) -> &[Effect] {
        &self.curses
    }

    /// Unresolved relics are excluded from search input.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Effects followed by curses, in scoring order.
    pub fn effects_and_curses(&self) -> impl Iterator<Item = &Effect> + Clone {
        self.effects.iter().chain(self.curses.iter())
    }

    /// Checks the model invariants a relic must satisfy before search.
    pub fn validate(&self) -> Result<()> {
        if self.size != self.effects.len() {
            return Err(RelicForgeError::Model(format!(
                "relic {:?} declares {} effects but carries {}",
                self.name,
                self.size,
                self.effects.len()
            )));
        }
        Ok(())
    }
}
