//! Configuration system for RelicForge.
//!
//! Three kinds of input configure a search:
//! - [`SearchConfig`]: result count, thresholds, pruning and termination,
//!   loaded from TOML or YAML
//! - score tables in the relaxed JSON score-file format, from a file or one of
//!   the builtin tables ([`parse_score_table`], [`builtin_score_table`])
//! - the [`VesselCatalog`], mapping build classes to their vessel slot
//!   patterns
//!
//! # Examples
//!
//! ```
//! use relicforge_config::SearchConfig;
//! use std::time::Duration;
//!
//! let config = SearchConfig::from_toml_str(r#"
//!     count = 25
//!     minimum = 10
//!
//!     [termination]
//!     seconds_spent_limit = 30
//! "#).unwrap();
//!
//! assert_eq!(config.count, 25);
//! assert_eq!(config.prune, 1);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use relicforge_config::SearchConfig;
//!
//! let config = SearchConfig::load("search.toml").unwrap_or_default();
//! assert_eq!(config.count, 10);
//! ```

mod score_file;
mod vessels;

use std::path::Path;
use std::time::Duration;

use relicforge_core::RelicForgeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use score_file::{
    builtin_score_table, builtin_score_table_names, load_score_table, parse_score_table,
    resolve_score_table, strip_relaxed_json,
};
pub use vessels::{VesselCatalog, VesselDefinition, UNIVERSAL_CLASS};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Unknown build class: {0}")]
    UnknownClass(String),

    #[error("Unknown builtin score table: {0}")]
    UnknownScoreTable(String),
}

impl From<ConfigError> for RelicForgeError {
    fn from(err: ConfigError) -> Self {
        RelicForgeError::Config(err.to_string())
    }
}

fn default_count() -> usize {
    10
}

fn default_prune() -> i64 {
    1
}

fn default_enable_pruning() -> bool {
    true
}

/// Search settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Number of builds to keep (K).
    #[serde(default = "default_count")]
    pub count: usize,

    /// Builds scoring below this are never collected.
    #[serde(default)]
    pub minimum: i64,

    /// Relics whose stand-alone score is below this are dropped before search.
    #[serde(default = "default_prune")]
    pub prune: i64,

    /// Branch-and-bound pruning; disabling it enumerates every path.
    #[serde(default = "default_enable_pruning")]
    pub enable_pruning: bool,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            minimum: 0,
            prune: default_prune(),
            enable_pruning: default_enable_pruning(),
            termination: None,
        }
    }
}

impl SearchConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML or YAML file, chosen by extension.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, doesn't parse, or fails
    /// [`SearchConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_minimum(mut self, minimum: i64) -> Self {
        self.minimum = minimum;
        self
    }

    pub fn with_prune(mut self, prune: i64) -> Self {
        self.prune = prune;
        self
    }

    pub fn with_pruning(mut self, enable_pruning: bool) -> Self {
        self.enable_pruning = enable_pruning;
        self
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the termination node limit.
    pub fn with_node_count_limit(mut self, nodes: u64) -> Self {
        self.termination = Some(TerminationConfig {
            node_count_limit: Some(nodes),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Checks the limits a search entry point requires.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::Invalid("count must be positive".to_string()));
        }
        if self.minimum < 0 {
            return Err(ConfigError::Invalid(format!(
                "minimum must not be negative, got {}",
                self.minimum
            )));
        }
        if self.prune < 0 {
            return Err(ConfigError::Invalid(format!(
                "prune must not be negative, got {}",
                self.prune
            )));
        }
        Ok(())
    }

    /// Returns the termination time limit, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Returns the termination node limit, if configured.
    pub fn node_count_limit(&self) -> Option<u64> {
        self.termination.as_ref().and_then(|t| t.node_count_limit)
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend searching.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum trie nodes to visit.
    pub node_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.seconds_spent_limit.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests;
