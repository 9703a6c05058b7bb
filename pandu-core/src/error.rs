//! Error types for the Pandu core library.

use thiserror::Error;

/// Top-level error type for all Pandu core operations.
///
/// Nothing in the interaction pipeline surfaces these to the user: the
/// emotion engine absorbs storage errors and the scene falls back to
/// canned reactions. They exist so callers and logs can tell failures apart.
#[derive(Error, Debug)]
pub enum PanduError {
    /// Serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// SQLite persistence error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A stored scalar could not be parsed back into its typed form.
    #[error("Corrupt stored value for key `{key}`: {value}")]
    CorruptValue {
        /// Storage key that held the value.
        key: String,
        /// Raw stored text.
        value: String,
    },

    /// Hit-mask pixel data does not match the declared dimensions.
    #[error("Invalid mask data: expected {expected} bytes, got {actual}")]
    InvalidMask {
        /// Byte count implied by width × height × channels.
        expected: usize,
        /// Byte count actually supplied.
        actual: usize,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, PanduError>;
