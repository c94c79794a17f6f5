//! Error types for readability-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Reasons a submitted request body cannot be analysed.
///
/// Display strings are returned verbatim as the `message` of an error
/// response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The declared body size is over the limit.
    #[error("Too many bytes: {size}. Current limit is {limit}.")]
    TooLarge {
        /// Declared or measured body size in bytes.
        size: usize,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// The body grew past the limit while being read (no size declared).
    #[error("Request body exceeds the limit of {limit} bytes.")]
    LimitExceeded {
        /// Configured limit in bytes.
        limit: usize,
    },

    /// The body could not be read from the connection.
    #[error("Request body could not be read.")]
    Unreadable,

    /// The body is not UTF-8 text.
    #[error("Request body is not valid UTF-8 text.")]
    InvalidUtf8,
}

/// Result type alias using [`RequestError`].
pub type RequestResult<T> = Result<T, RequestError>;
