//! Resolver transport error types.

use thiserror::Error;

/// Errors that can occur while talking to the reaction resolver.
///
/// None of these reach the user. The scene treats every variant the same
/// way and plays the local fallback reaction instead.
#[derive(Debug, Error)]
pub enum NetError {
    /// HTTP request failed before a response arrived.
    #[error("Resolver request failed: {0}")]
    RequestFailed(String),

    /// Non-success status whose body did not decode.
    #[error("Resolver returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// Response body was not the expected JSON shape.
    #[error("Failed to decode resolver response: {0}")]
    Decode(String),

    /// Request timed out.
    #[error("Resolver request timed out after {0}ms")]
    Timeout(u64),

    /// Resolver unreachable or not configured.
    #[error("Resolver unavailable: {0}")]
    Unavailable(String),

    /// All retry attempts exhausted.
    #[error("All resolver attempts exhausted after {attempts} tries: {last_error}")]
    RetriesExhausted {
        /// Attempts made.
        attempts: u32,
        /// Error from the final attempt.
        last_error: String,
    },

    /// Configuration error.
    #[error("Resolver configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for NetError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetError::Timeout(0)
        } else if err.is_connect() {
            NetError::Unavailable(err.to_string())
        } else if err.is_decode() {
            NetError::Decode(err.to_string())
        } else {
            NetError::RequestFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for NetError {
    fn from(err: serde_json::Error) -> Self {
        NetError::Decode(err.to_string())
    }
}
