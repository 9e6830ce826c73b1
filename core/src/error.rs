//! Error types for the Harvest client core.
//!
//! # Design
//! Non-2xx responses are not classified any further: every one of them lands
//! in `Http` with the raw status code and body. Transport failures keep the
//! transport's own error as their source so callers can downcast it.

use std::error::Error as StdError;

/// Error produced by a `Transport` implementation.
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Errors returned by `HarvestClient` operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The transport could not complete the round trip (connection, DNS, timeout).
    #[error("transport failure: {0}")]
    Transport(#[source] BoxedError),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed (status {status}): {message}")]
    Deserialization {
        status: u16,
        body: String,
        message: String,
    },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The base URL and path did not form a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } | ApiError::Deserialization { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
