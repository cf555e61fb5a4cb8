//! Request executor errors.

use thiserror::Error;

/// Errors reported by a [`RequestExecutor`](crate::RequestExecutor).
///
/// The crate never performs I/O itself; executors map their transport
/// failures into these variants so callers can match on them uniformly.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The executor failed to issue the request.
    #[error("Request failed: {0}")]
    Request(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Server returned a non-success HTTP status code.
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: u16,
        /// Error message from the response body.
        message: String,
    },

    /// Failed to establish connection to the server.
    #[error("Connection failed: {0}")]
    Connection(String),
}

impl ClientError {
    /// Wraps any executor-side error.
    pub fn request(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Request(Box::new(err))
    }

    /// Returns the HTTP status code if this is an HTTP status error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
