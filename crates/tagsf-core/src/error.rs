//! Error types for tagsf

use thiserror::Error;

/// tagsf error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A construction-time configuration field failed validation.
    #[error("invalid configuration `{field}`: {reason}")]
    Config {
        /// Name of the offending field (e.g. `"efficiency_loose"`).
        field: String,
        /// Human-readable reason.
        reason: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Computation error
    #[error("Computation error: {0}")]
    Computation(String),
}

impl Error {
    /// Shorthand for [`Error::Config`].
    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Config { field: field.into(), reason: reason.into() }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
