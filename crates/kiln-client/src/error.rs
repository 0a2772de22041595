//! Error types for the Kiln client.

use thiserror::Error;

/// Represents an error raised by the Kiln client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Invalid or missing configuration (credentials, retry parameters).
    /// Raised synchronously, before any network activity.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The platform answered with a status code outside the accepted set.
    /// Carries the raw response text so the caller can diagnose the
    /// remote-side message.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code of the failed response.
        status: u16,
        /// Raw response body text.
        body: String,
    },

    /// Transport-level failure (connection, TLS, body decoding).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Malformed caller input, rejected before any network call.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A success response whose body does not match the platform contract
    /// (missing field, wrong shape). Not retried.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The queried model exists but has not finished training.
    /// Terminal for this call; poll again later.
    #[error("Model '{name}' is not ready (status: {status})")]
    NotReady {
        /// Model name or id that was queried.
        name: String,
        /// The status string the platform reported.
        status: String,
    },
}

/// Result type for client operations.
pub type ClientResult<T> = std::result::Result<T, ClientError>;
