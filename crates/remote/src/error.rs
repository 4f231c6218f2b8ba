// crates/remote/src/error.rs
//! Error types for remote love-service calls

use thiserror::Error;

/// Result type for remote operations
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Errors that can occur talking to the marketplace backend
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP transport failure (connect, TLS, timeout)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Server rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// No usable authentication token
    #[error("Authentication token unavailable: {0}")]
    TokenUnavailable(String),

    /// Malformed base URL or path
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl RemoteError {
    /// Returns true if the failure came from auth rather than the network
    pub fn is_auth_failure(&self) -> bool {
        match self {
            RemoteError::TokenUnavailable(_) => true,
            RemoteError::Rejected { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }
}
