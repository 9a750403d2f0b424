//! Error types for RelicForge

use thiserror::Error;

/// Main error type for RelicForge operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelicForgeError {
    /// Error in search configuration (result count, thresholds, score table)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A relic or effect violates a model invariant
    #[error("Model error: {0}")]
    Model(String),

    /// Search stopped before it covered every vessel
    #[error("Search was cancelled")]
    Cancelled,
}

/// Result type alias for RelicForge operations
pub type Result<T> = std::result::Result<T, RelicForgeError>;
