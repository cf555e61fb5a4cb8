//! Top-level API error type.

use super::{ClientError, ConfigError, PathError, ValidationError};
use thiserror::Error;

/// Top-level error type for all API operations.
///
/// This enum aggregates all error categories, enabling unified error handling
/// while preserving the ability to match on specific error types when needed.
///
/// ## Examples
///
/// ```rust,ignore
/// use api::error::ApiError;
///
/// fn handle_error(err: ApiError) {
///     match err {
///         ApiError::Path(e) => eprintln!("Bad path arguments: {e}"),
///         ApiError::Config(e) => eprintln!("Bad definition: {e}"),
///         ApiError::Validation(e) => eprintln!("Rejected input: {e}"),
///         ApiError::Client(e) => eprintln!("Request failed: {e}"),
///         ApiError::Hook(msg) => eprintln!("Hook aborted the call: {msg}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Path template parsing or rendering errors.
    #[error(transparent)]
    Path(#[from] PathError),

    /// Endpoint or API definition errors.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Input validation and response decoding errors.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Errors reported by the request executor.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A hook aborted the call.
    #[error("Hook failed: {0}")]
    Hook(String),
}

impl ApiError {
    /// Creates a hook failure.
    pub fn hook(message: impl Into<String>) -> Self {
        Self::Hook(message.into())
    }
}
