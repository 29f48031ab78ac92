use reqwest::StatusCode;
use thiserror::Error;

/// Failure taxonomy for repository operations.
///
/// Every variant surfaces to consumers as `Resource::Error(message)`; the
/// class determines only the message text, never the control flow.
#[derive(Debug, Error)]
pub enum RepoError {
    /// Transport completed but the HTTP status or the envelope reports
    /// failure. Carries the server message or a per-operation fallback.
    #[error("{0}")]
    Protocol(String),
    /// The server could not be reached or the connection was interrupted.
    #[error("Network Error: {0}")]
    Transport(String),
    /// The envelope reported success but the expected payload shape is
    /// absent or malformed.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// Serialization failures, multipart encoding issues, anything else.
    #[error("Unexpected Error: {0}")]
    Unexpected(String),
}

/// Payload-shape failures. The display strings are user-facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Invalid group data format")]
    InvalidGroup,
    #[error("Invalid expense data format")]
    InvalidExpense,
    #[error("Could not extract receipt data")]
    InvalidReceipt,
}

impl RepoError {
    /// Classifies a failing HTTP status.
    pub(crate) fn http_status(status: StatusCode) -> Self {
        let reason = status.canonical_reason().unwrap_or("Unknown Error");
        RepoError::Protocol(format!("Error: {} - {}", status.as_u16(), reason))
    }

    /// A rejected envelope: prefer the server message, fall back to the
    /// operation-specific default.
    pub(crate) fn envelope(message: String, fallback: &str) -> Self {
        if message.is_empty() {
            RepoError::Protocol(fallback.to_string())
        } else {
            RepoError::Protocol(message)
        }
    }

    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            RepoError::Transport("Check your internet connection".to_string())
        } else {
            RepoError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(err: serde_json::Error) -> Self {
        RepoError::Unexpected(err.to_string())
    }
}
