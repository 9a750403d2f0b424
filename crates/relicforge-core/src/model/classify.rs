//! Name-based effect classification.
//!
//! Stacking and exclusivity are game rules keyed on effect names. They are
//! resolved once, here, into plain [`Effect`] fields.

use crate::error::Result;

use super::effect::{Effect, ExclusiveTag};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pattern {
    Exact(String),
    Prefix(String),
    Suffix(String),
    Contains(String),
}

impl Pattern {
    fn matches(&self, key: &str) -> bool {
        match self {
            Pattern::Exact(p) => key == p,
            Pattern::Prefix(p) => key.starts_with(p.as_str()),
            Pattern::Suffix(p) => key.ends_with(p.as_str()),
            Pattern::Contains(p) => key.contains(p.as_str()),
        }
    }
}

/// One classification rule: a case-insensitive name pattern and the flags
/// it assigns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRule {
    pattern: Pattern,
    stackable: bool,
    exclusive: Option<ExclusiveTag>,
}

impl MatchRule {
    fn with_pattern(pattern: Pattern) -> Self {
        Self {
            pattern,
            stackable: false,
            exclusive: None,
        }
    }

    pub fn exact(name: &str) -> Self {
        Self::with_pattern(Pattern::Exact(name.to_lowercase()))
    }

    pub fn prefix(prefix: &str) -> Self {
        Self::with_pattern(Pattern::Prefix(prefix.to_lowercase()))
    }

    pub fn suffix(suffix: &str) -> Self {
        Self::with_pattern(Pattern::Suffix(suffix.to_lowercase()))
    }

    pub fn contains(fragment: &str) -> Self {
        Self::with_pattern(Pattern::Contains(fragment.to_lowercase()))
    }

    /// Matching effects stack.
    pub fn stackable(mut self) -> Self {
        self.stackable = true;
        self
    }

    /// Matching effects share the exclusivity tag `tag`.
    pub fn exclusive(mut self, tag: &str) -> Self {
        self.exclusive = Some(ExclusiveTag::new(tag));
        self
    }

    /// Returns true if the rule applies to the lower-cased name `key`.
    pub fn matches(&self, key: &str) -> bool {
        self.pattern.matches(key)
    }
}

/// Ordered rule list; the first matching rule decides an effect's flags.
///
/// Effects matching no rule are neither stackable nor exclusive.
///
/// # Examples
///
/// ```
/// use relicforge_core::EffectClassifier;
///
/// let classifier = EffectClassifier::default();
/// let sorcery = classifier.parse("Improved Sorcery +1").unwrap();
/// assert!(sorcery.is_stackable());
///
/// let frost = classifier.parse("Starting armament deals frost").unwrap();
/// assert_eq!(frost.exclusive().map(|t| t.as_str()), Some("imbue"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectClassifier {
    rules: Vec<MatchRule>,
}

impl Default for EffectClassifier {
    fn default() -> Self {
        Self::new(vec![
            MatchRule::prefix("Improved ").stackable(),
            MatchRule::prefix("Starting armament deals ").exclusive("imbue"),
            MatchRule::prefix("Starting armament inflicts ").exclusive("imbue"),
            MatchRule::prefix("Changes compatible armament's skill to ").exclusive("skill"),
        ])
    }
}

impl EffectClassifier {
    pub fn new(rules: Vec<MatchRule>) -> Self {
        Self { rules }
    }

    /// A classifier with no rules.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn rules(&self) -> &[MatchRule] {
        &self.rules
    }

    /// Appends a rule with the lowest priority.
    pub fn with_rule(mut self, rule: MatchRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Builds a classified effect from a bare name and level.
    pub fn classify(&self, name: &str, level: u32) -> Effect {
        self.apply(Effect::new(name, level))
    }

    /// Parses a display name (`"Name +N"`) into a classified effect.
    pub fn parse(&self, display_name: &str) -> Result<Effect> {
        Effect::parse(display_name).map(|effect| self.apply(effect))
    }

    fn apply(&self, effect: Effect) -> Effect {
        match self.rules.iter().find(|rule| rule.matches(effect.key())) {
            Some(rule) => effect
                .with_stackable(rule.stackable)
                .with_exclusive_tag(rule.exclusive.clone()),
            None => effect,
        }
    }
}
