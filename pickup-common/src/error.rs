//! Common error types for pickup

use thiserror::Error;

/// Common result type for pickup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the pickup crates
#[derive(Error, Debug)]
pub enum Error {
    /// The music daemon could not be reached or returned a failure.
    ///
    /// Fatal for a refresh: the caller gets an empty collection.
    #[error("Source fetch error: {0}")]
    SourceFetch(String),

    /// A single library path could not be split into its parts.
    ///
    /// Recoverable: the builder skips the path and carries on.
    #[error("Malformed path '{path}': {reason}")]
    MalformedPath { path: String, reason: String },

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be parsed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(path: &str, reason: &str) -> Self {
        Error::MalformedPath {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True for errors that abort a whole refresh.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::MalformedPath { .. })
    }
}
