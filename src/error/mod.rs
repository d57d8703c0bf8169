//! Error types for the chat client.
//!
//! Transport failures come from the [`HttpClient`](crate::traits::HttpClient)
//! seam as [`HttpError`]; everything the client itself reports is a
//! [`ChatError`]. Failures inside an exchange are never returned to the
//! caller: the session renders them and ends in `Failed`.

use thiserror::Error;

use crate::traits::HttpError;

/// Result type alias for chat client operations.
pub type ChatResult<T> = Result<T, ChatError>;

/// Errors reported by [`ChatClient`](crate::client::ChatClient).
#[derive(Debug, Error)]
pub enum ChatError {
    /// The server answered with a non-2xx status before any body was consumed.
    #[error("Request failed: {status}")]
    Status { status: u16, body: String },

    /// The server reported an error in a JSON error body.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Transport-level failure (connect, timeout, read).
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Request or response body was not the expected JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChatError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ChatError::Status { status, .. } | ChatError::Server { status, .. } => Some(*status),
            ChatError::Http(HttpError::ServerError { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// Whether the server could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            ChatError::Http(HttpError::ConnectionFailed(_) | HttpError::Timeout(_))
        )
    }
}
