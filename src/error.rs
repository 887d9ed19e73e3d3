//! Error types for taskmate
//!
//! This module defines the error types used by the API client, configuration
//! loader and command handlers, using `thiserror` for ergonomic error handling.
//!
//! Failures inside the chat pipeline are not reported through this type;
//! they are recovered into canned assistant replies (see
//! [`crate::chat::ChatFailure`]).

use thiserror::Error;

/// Main error type for taskmate operations
#[derive(Error, Debug)]
pub enum TaskmateError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend returned a non-success status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Authentication errors (e.g., 401 Unauthorized)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// No stored token for an operation that needs one
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Client-side input validation failed before any request was made
    #[error("{0}")]
    Validation(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    /// URL parsing errors
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type alias for taskmate operations
///
/// Uses `anyhow::Error` so handlers can attach context while still being
/// able to downcast to [`TaskmateError`].
pub type Result<T> = anyhow::Result<T>;
