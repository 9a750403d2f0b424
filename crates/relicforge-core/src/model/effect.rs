//! Effect value type.

use std::fmt;

use crate::error::{RelicForgeError, Result};

/// Tag shared by mutually exclusive effects.
///
/// At most one effect bearing a given tag is active within one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExclusiveTag(String);

impl ExclusiveTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExclusiveTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named, leveled modifier carried by a relic.
///
/// Immutable once constructed. The lower-cased name is computed up front so
/// score lookups in the search loop never allocate.
///
/// # Examples
///
/// ```
/// use relicforge_core::Effect;
///
/// let effect = Effect::parse("Improved Sorcery +2").unwrap().with_stackable(true);
/// assert_eq!(effect.name(), "Improved Sorcery");
/// assert_eq!(effect.level(), 2);
/// assert_eq!(effect.qualified_name(), "Improved Sorcery +2");
/// assert!(effect.is_stackable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Effect {
    name: String,
    key: String,
    level: u32,
    stackable: bool,
    exclusive: Option<ExclusiveTag>,
}

impl Effect {
    /// Creates a non-stackable, non-exclusive effect.
    pub fn new(name: impl Into<String>, level: u32) -> Self {
        let name = name.into();
        let key = name.to_lowercase();
        Self {
            name,
            key,
            level,
            stackable: false,
            exclusive: None,
        }
    }

    /// Parses a display name with an optional trailing `+N` level.
    ///
    /// A suffix that is not purely numeric is kept as part of the name.
    /// Returns `RelicForgeError::Model` if the level does not fit.
    pub fn parse(display_name: &str) -> Result<Self> {
        let trimmed = display_name.trim();
        if let Some((name, suffix)) = trimmed.rsplit_once(" +") {
            if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
                let level = suffix.parse::<u32>().map_err(|_| {
                    RelicForgeError::Model(format!("effect level out of range: {display_name:?}"))
                })?;
                return Ok(Self::new(name.trim_end(), level));
            }
        }
        Ok(Self::new(trimmed, 0))
    }

    pub fn with_stackable(mut self, stackable: bool) -> Self {
        self.stackable = stackable;
        self
    }

    pub fn with_exclusive(mut self, tag: impl Into<String>) -> Self {
        self.exclusive = Some(ExclusiveTag::new(tag));
        self
    }

    pub fn with_exclusive_tag(mut self, tag: Option<ExclusiveTag>) -> Self {
        self.exclusive = tag;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The lower-cased name used for score lookups.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// True if duplicates of the same name and level all count.
    #[inline]
    pub fn is_stackable(&self) -> bool {
        self.stackable
    }

    #[inline]
    pub fn exclusive(&self) -> Option<&ExclusiveTag> {
        self.exclusive.as_ref()
    }

    /// `"name +N"`, or the bare name at level 0.
    pub fn qualified_name(&self) -> String {
        if self.level == 0 {
            self.name.clone()
        } else {
            format!("{} +{}", self.name, self.level)
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.level == 0 {
            f.write_str(&self.name)
        } else {
            write!(f, "{} +{}", self.name, self.level)
        }
    }
}
