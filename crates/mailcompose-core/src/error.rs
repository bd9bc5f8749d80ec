//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Address list text could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] mailcompose_address::Error),

    /// The directory backend could not answer a search.
    #[error("Directory unavailable: {0}")]
    DirectoryUnavailable(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// URL could not be built.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Preference name not present in the schema.
    #[error("Unknown preference: {0}")]
    UnknownPreference(String),

    /// Preference value not among the allowed choices.
    #[error("Invalid value '{value}' for preference '{name}'")]
    InvalidPreference {
        /// Preference name.
        name: String,
        /// Rejected value.
        value: String,
    },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
