//! Error types for the job board plugin.
//!
//! This module defines the centralized error type [`JobBoardError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Network failures never escape a screen: the event handler converts them into a
//! screen-level message via [`JobBoardError::server_message`] or a per-operation
//! fallback string.

use thiserror::Error;

/// The main error type for job board operations.
///
/// Covers the whole request lifecycle (transport, HTTP status, response decoding)
/// plus the local concerns of the plugin: attachment I/O, themes and worker IPC.
#[derive(Debug, Error)]
pub enum JobBoardError {
    /// The request never produced a usable response.
    #[error("Network error: {0}")]
    Transport(String),

    /// The API answered with a non-2xx status.
    ///
    /// `message` carries the `message` field of the JSON error body when the
    /// server sent one, otherwise it is empty.
    #[error("Request failed with status {status}: {message}")]
    Http {
        /// HTTP status code returned by the API.
        status: u16,
        /// Server-provided message, possibly empty.
        message: String,
    },

    /// The admin check was refused with `403`.
    ///
    /// Every other endpoint reports `403` as [`JobBoardError::Http`].
    #[error("Access denied")]
    Forbidden,

    /// The response body did not have the expected shape.
    #[error("Malformed response: {0}")]
    Decode(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations, typically while reading
    /// an attachment in the worker thread.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An upload file was rejected before reading (missing, not a file, too large).
    #[error("{0}")]
    Attachment(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

impl JobBoardError {
    /// Returns the server-provided error message, if there is a non-empty one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http { message, .. } if !message.trim().is_empty() => Some(message.as_str()),
            _ => None,
        }
    }

    /// Returns `true` for failures where no HTTP response was received.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<serde_json::Error> for JobBoardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// A specialized `Result` type for job board operations.
pub type Result<T> = std::result::Result<T, JobBoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_ignores_blank_bodies() {
        let err = JobBoardError::Http { status: 500, message: "  ".to_string() };
        assert_eq!(err.server_message(), None);

        let err = JobBoardError::Http { status: 400, message: "Already applied".to_string() };
        assert_eq!(err.server_message(), Some("Already applied"));
        assert_eq!(JobBoardError::Forbidden.server_message(), None);
    }

    #[test]
    fn json_errors_become_decode_errors() {
        let err: JobBoardError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, JobBoardError::Decode(_)));
    }
}
