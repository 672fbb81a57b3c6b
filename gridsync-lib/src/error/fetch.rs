//! Fetch error types

use std::time::Duration;

/// Errors that can occur while fetching a grid view from the server.
///
/// The controller never propagates these to the caller; every fetch failure
/// is converted to the grid's `Error` phase and surfaced through the error
/// handler.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Non-success HTTP response from the server.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("timeout after {0:?}")]
    Timeout(Duration),

    /// The request parameters could not be encoded.
    #[error("payload encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl FetchError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this error is potentially retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::Network(_) => true,
            Self::Timeout(_) => true,
            Self::Encode(_) => false,
        }
    }
}
