//! Client error types.

use thiserror::Error;

use crate::transport::TransportError;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Client error type.
///
/// Every failed call resolves to exactly one of these kinds, and every kind
/// is terminal for that call: the client never retries.
#[derive(Debug, Error)]
pub enum Error {
    /// Host and path did not combine into a valid URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The transport failed before any response body was available.
    #[error("API request failed: {0}")]
    Transport(#[from] TransportError),

    /// The transport returned successfully but with no body bytes.
    #[error("Empty API response")]
    EmptyResponse,

    /// The response body did not decode as a response envelope.
    #[error("JSON decoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The API reported an error in the response envelope.
    #[error("API error: {0}")]
    Api(String),
}

impl Error {
    /// Check if this is a transport-level failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Check if this is an error the API reported in-band.
    pub fn is_api_error(&self) -> bool {
        matches!(self, Error::Api(_))
    }

    /// The server-reported error message, if the API reported one.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Error::Api(message) => Some(message),
            _ => None,
        }
    }
}
