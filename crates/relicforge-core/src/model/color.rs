//! Relic colors and the slot requirements that match them.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::RelicForgeError;

/// The closed set of relic colors.
///
/// Each of the four base colors has a "deep" variant. [`Color::Unknown`] marks
/// a relic whose color could not be resolved against the item database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum Color {
    Red,
    Blue,
    Yellow,
    Green,
    DeepRed,
    DeepBlue,
    DeepYellow,
    DeepGreen,
    Unknown,
}

impl Color {
    /// Every color, in declaration order.
    pub const ALL: [Color; 9] = [
        Color::Red,
        Color::Blue,
        Color::Yellow,
        Color::Green,
        Color::DeepRed,
        Color::DeepBlue,
        Color::DeepYellow,
        Color::DeepGreen,
        Color::Unknown,
    ];

    /// Returns the canonical name, e.g. `"Red"` or `"DeepRed"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Yellow => "Yellow",
            Color::Green => "Green",
            Color::DeepRed => "DeepRed",
            Color::DeepBlue => "DeepBlue",
            Color::DeepYellow => "DeepYellow",
            Color::DeepGreen => "DeepGreen",
            Color::Unknown => "Unknown",
        }
    }

    /// Returns true for the deep variants.
    #[inline]
    pub const fn is_deep(self) -> bool {
        matches!(
            self,
            Color::DeepRed | Color::DeepBlue | Color::DeepYellow | Color::DeepGreen
        )
    }

    /// Returns the deep variant of a base color, or `self` otherwise.
    pub const fn deep(self) -> Self {
        match self {
            Color::Red => Color::DeepRed,
            Color::Blue => Color::DeepBlue,
            Color::Yellow => Color::DeepYellow,
            Color::Green => Color::DeepGreen,
            other => other,
        }
    }

    /// Returns the base color of a deep variant, or `self` otherwise.
    pub const fn base(self) -> Self {
        match self {
            Color::DeepRed => Color::Red,
            Color::DeepBlue => Color::Blue,
            Color::DeepYellow => Color::Yellow,
            Color::DeepGreen => Color::Green,
            other => other,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = RelicForgeError;

    /// Parses a color name case-insensitively.
    ///
    /// Deep variants are accepted as `DeepRed`, `deep_red`, `deep-red` or
    /// `Deep Red`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        Color::ALL
            .into_iter()
            .find(|color| color.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| RelicForgeError::Model(format!("unknown relic color: {s:?}")))
    }
}

impl TryFrom<String> for Color {
    type Error = RelicForgeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.as_str().to_string()
    }
}

/// What a vessel slot accepts: one concrete color, or any (wildcard).
///
/// Ordering puts concrete colors first, sorted by name, and the wildcard last.
/// The search relies on this for its deterministic child order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum SlotRequirement {
    Color(Color),
    Any,
}

impl SlotRequirement {
    /// Returns true if a relic of `color` may fill this slot.
    ///
    /// The wildcard admits every non-deep color.
    pub fn admits(self, color: Color) -> bool {
        match self {
            SlotRequirement::Color(required) => required == color,
            SlotRequirement::Any => !color.is_deep(),
        }
    }

    #[inline]
    pub fn is_wildcard(self) -> bool {
        matches!(self, SlotRequirement::Any)
    }
}

impl Ord for SlotRequirement {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SlotRequirement::Color(a), SlotRequirement::Color(b)) => a.as_str().cmp(b.as_str()),
            (SlotRequirement::Color(_), SlotRequirement::Any) => Ordering::Less,
            (SlotRequirement::Any, SlotRequirement::Color(_)) => Ordering::Greater,
            (SlotRequirement::Any, SlotRequirement::Any) => Ordering::Equal,
        }
    }
}

impl PartialOrd for SlotRequirement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Color> for SlotRequirement {
    fn from(color: Color) -> Self {
        SlotRequirement::Color(color)
    }
}

impl fmt::Display for SlotRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotRequirement::Color(color) => write!(f, "{}", color),
            SlotRequirement::Any => f.write_str("Any"),
        }
    }
}

impl FromStr for SlotRequirement {
    type Err = RelicForgeError;

    /// Parses a color name, or `any` / `*` for the wildcard.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == "*" || trimmed.eq_ignore_ascii_case("any") {
            Ok(SlotRequirement::Any)
        } else {
            trimmed.parse().map(SlotRequirement::Color)
        }
    }
}

impl TryFrom<String> for SlotRequirement {
    type Error = RelicForgeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SlotRequirement> for String {
    fn from(requirement: SlotRequirement) -> Self {
        requirement.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse_variants() {
        assert_eq!("red".parse::<Color>().unwrap(), Color::Red);
        assert_eq!("DeepGreen".parse::<Color>().unwrap(), Color::DeepGreen);
        assert_eq!("deep_blue".parse::<Color>().unwrap(), Color::DeepBlue);
        assert_eq!("Deep Yellow".parse::<Color>().unwrap(), Color::DeepYellow);
        assert!("purple".parse::<Color>().is_err());
    }

    #[test]
    fn test_deep_round_trip() {
        for color in [Color::Red, Color::Blue, Color::Yellow, Color::Green] {
            assert!(!color.is_deep());
            assert!(color.deep().is_deep());
            assert_eq!(color.deep().base(), color);
        }
        assert_eq!(Color::Unknown.deep(), Color::Unknown);
    }

    #[test]
    fn test_wildcard_admits_only_non_deep() {
        assert!(SlotRequirement::Any.admits(Color::Red));
        assert!(SlotRequirement::Any.admits(Color::Unknown));
        assert!(!SlotRequirement::Any.admits(Color::DeepRed));
        assert!(SlotRequirement::Color(Color::DeepRed).admits(Color::DeepRed));
        assert!(!SlotRequirement::Color(Color::Red).admits(Color::DeepRed));
    }

    #[test]
    fn test_requirement_order_puts_wildcard_last() {
        let mut requirements = vec![
            SlotRequirement::Any,
            SlotRequirement::Color(Color::Yellow),
            SlotRequirement::Color(Color::Blue),
            SlotRequirement::Color(Color::Red),
            SlotRequirement::Color(Color::Green),
        ];
        requirements.sort();
        assert_eq!(
            requirements,
            vec![
                SlotRequirement::Color(Color::Blue),
                SlotRequirement::Color(Color::Green),
                SlotRequirement::Color(Color::Red),
                SlotRequirement::Color(Color::Yellow),
                SlotRequirement::Any,
            ]
        );
    }

    #[test]
    fn test_requirement_parse() {
        assert_eq!("any".parse::<SlotRequirement>().unwrap(), SlotRequirement::Any);
        assert_eq!("*".parse::<SlotRequirement>().unwrap(), SlotRequirement::Any);
        assert_eq!(
            " green ".parse::<SlotRequirement>().unwrap(),
            SlotRequirement::Color(Color::Green)
        );
    }
}
