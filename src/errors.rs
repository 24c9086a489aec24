//! Unified error types and result handling for `BundleBoard`.

use thiserror::Error;

/// All error conditions the crate can surface.
///
/// Derivation itself never fails (bad records degrade to defaults or get
/// dropped); errors here come from configuration and from talking to the
/// backend.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or value problems
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// The backend answered with a non-success status
    #[error("Backend returned status {status}: {message}")]
    Backend {
        /// HTTP status code of the response
        status: u16,
        /// Response body, usually the backend's error text
        message: String,
    },

    /// HTTP transport failure (connection, timeout, invalid URL)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A backend payload that could not be decoded as JSON
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
