//! Vessel catalogs.
//!
//! A catalog lists, per build class, the vessels that class can equip and
//! their slot patterns. Vessels of [`UNIVERSAL_CLASS`] are available to every
//! class.
//!
//! # Examples
//!
//! ```
//! use relicforge_config::VesselCatalog;
//!
//! let catalog = VesselCatalog::from_toml_str(r#"
//!     [[vessels]]
//!     class = "duchess"
//!     name = "Duchess's Urn"
//!     slots = ["blue", "blue", "red"]
//!
//!     [[vessels]]
//!     class = "duchess"
//!     name = "Duchess's Chalice"
//!     slots = ["yellow", "blue", "any"]
//! "#).unwrap();
//!
//! let tree = catalog.tree_for("duchess").unwrap();
//! assert_eq!(tree.vessel_count(), 2);
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use relicforge_core::{Color, SlotRequirement, VesselTree};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Class name whose vessels every class may use.
pub const UNIVERSAL_CLASS: &str = "*";

/// One named vessel and the slot pattern it imposes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct VesselDefinition {
    pub class: String,
    pub name: String,
    pub slots: Vec<SlotRequirement>,
}

impl VesselDefinition {
    pub fn new(
        class: impl Into<String>,
        name: impl Into<String>,
        slots: impl Into<Vec<SlotRequirement>>,
    ) -> Self {
        Self {
            class: class.into(),
            name: name.into(),
            slots: slots.into(),
        }
    }

    fn is_universal(&self) -> bool {
        self.class == UNIVERSAL_CLASS
    }

    fn belongs_to(&self, class: &str) -> bool {
        self.class.eq_ignore_ascii_case(class)
    }
}

/// Vessel definitions for every build class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct VesselCatalog {
    #[serde(default)]
    vessels: Vec<VesselDefinition>,
}

impl VesselCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The three-slot urn tables for the raider, guardian and executor
    /// classes plus the universal grails.
    pub fn builtin() -> Self {
        use Color::{Blue as B, Green as G, Red as R, Yellow as Y};

        fn slots(pattern: [Option<Color>; 3]) -> Vec<SlotRequirement> {
            pattern
                .into_iter()
                .map(|slot| slot.map_or(SlotRequirement::Any, SlotRequirement::Color))
                .collect()
        }

        let table: [(&str, &str, [Option<Color>; 3]); 18] = [
            (UNIVERSAL_CLASS, "Sacred Erdtree Grail", [Some(Y), Some(Y), Some(Y)]),
            (UNIVERSAL_CLASS, "Spirit Shelter Grail", [Some(G), Some(G), Some(G)]),
            (UNIVERSAL_CLASS, "Giant's Cradle Grail", [Some(B), Some(B), Some(B)]),
            ("raider", "Raider's Urn", [Some(R), Some(G), Some(G)]),
            ("raider", "Raider's Goblet", [Some(R), Some(B), Some(Y)]),
            ("raider", "Raider's Chalice", [Some(R), Some(R), None]),
            ("raider", "Soot-Covered Raider's Urn", [Some(B), Some(B), Some(G)]),
            ("raider", "Sealed Raider's Urn", [Some(G), Some(G), Some(R)]),
            ("guardian", "Guardian's Urn", [Some(R), Some(Y), Some(Y)]),
            ("guardian", "Guardian's Goblet", [Some(B), Some(B), Some(G)]),
            ("guardian", "Guardian's Chalice", [Some(B), Some(Y), None]),
            ("guardian", "Soot-Covered Guardian's Urn", [Some(R), Some(G), Some(G)]),
            ("guardian", "Sealed Guardian's Urn", [Some(Y), Some(Y), Some(R)]),
            ("executor", "Executor's Urn", [Some(R), Some(Y), Some(Y)]),
            ("executor", "Executor's Goblet", [Some(R), Some(B), Some(G)]),
            ("executor", "Executor's Chalice", [Some(B), Some(Y), None]),
            ("executor", "Soot-Covered Executor's Urn", [Some(R), Some(R), Some(B)]),
            ("executor", "Sealed Executor's Urn", [Some(Y), Some(Y), Some(R)]),
        ];

        Self {
            vessels: table
                .into_iter()
                .map(|(class, name, pattern)| VesselDefinition::new(class, name, slots(pattern)))
                .collect(),
        }
    }

    /// Loads a catalog from a TOML or YAML file, chosen by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let catalog: Self = toml::from_str(s)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let catalog: Self = serde_yaml::from_str(s)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Adds a vessel, replacing any with the same class and name.
    pub fn with_vessel(mut self, vessel: VesselDefinition) -> Self {
        self.upsert(vessel);
        self
    }

    /// Merges `other` into this catalog. Its vessels replace existing ones
    /// with the same class and name.
    pub fn merge(&mut self, other: VesselCatalog) {
        for vessel in other.vessels {
            self.upsert(vessel);
        }
    }

    fn upsert(&mut self, vessel: VesselDefinition) {
        match self
            .vessels
            .iter_mut()
            .find(|v| v.belongs_to(&vessel.class) && v.name == vessel.name)
        {
            Some(existing) => *existing = vessel,
            None => self.vessels.push(vessel),
        }
    }

    pub fn vessels(&self) -> &[VesselDefinition] {
        &self.vessels
    }

    /// Class names with class-specific vessels, sorted.
    pub fn classes(&self) -> Vec<String> {
        let mut classes: Vec<String> = self
            .vessels
            .iter()
            .filter(|v| !v.is_universal())
            .map(|v| v.class.to_lowercase())
            .collect();
        classes.sort();
        classes.dedup();
        classes
    }

    /// Vessels available to `class`: its own followed by the universal ones.
    pub fn vessels_for(&self, class: &str) -> Result<Vec<&VesselDefinition>, ConfigError> {
        if !self.vessels.iter().any(|v| !v.is_universal() && v.belongs_to(class)) {
            return Err(ConfigError::UnknownClass(class.to_string()));
        }
        let own = self.vessels.iter().filter(|v| !v.is_universal() && v.belongs_to(class));
        let universal = self.vessels.iter().filter(|v| v.is_universal());
        Ok(own.chain(universal).collect())
    }

    /// Builds the slot-pattern trie searched for `class`.
    pub fn tree_for(&self, class: &str) -> Result<VesselTree, ConfigError> {
        let vessels = self.vessels_for(class)?;
        Ok(VesselTree::from_patterns(
            vessels.into_iter().map(|v| (v.name.as_str(), v.slots.as_slice())),
        ))
    }

    /// Checks that every vessel has a name and slots, and that all vessels
    /// available to one class have the same slot count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for vessel in &self.vessels {
            if vessel.name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "vessel of class {:?} has no name",
                    vessel.class
                )));
            }
            if vessel.slots.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "vessel {:?} has no slots",
                    vessel.name
                )));
            }
        }

        let universal_len = self
            .vessels
            .iter()
            .find(|v| v.is_universal())
            .map(|v| v.slots.len());
        let mut lengths: BTreeMap<String, usize> = BTreeMap::new();
        for vessel in &self.vessels {
            let key = vessel.class.to_lowercase();
            let expected = if vessel.is_universal() {
                universal_len
            } else {
                lengths.get(&key).copied().or(universal_len)
            };
            if let Some(expected) = expected {
                if expected != vessel.slots.len() {
                    return Err(ConfigError::Invalid(format!(
                        "vessel {:?} has {} slots, but class {:?} uses {}",
                        vessel.name,
                        vessel.slots.len(),
                        vessel.class,
                        expected
                    )));
                }
            }
            lengths.insert(key, vessel.slots.len());
        }
        Ok(())
    }
}
