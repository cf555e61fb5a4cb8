//! Layered error types for the API crate.
//!
//! The error hierarchy is structured for actionable diagnostics:
//! - [`ApiError`] - Top-level error type for all API operations
//! - [`PathError`] - Path template parsing and rendering errors
//! - [`ConfigError`] - Endpoint and API definition errors
//! - [`ValidationError`] - Input validation and response decoding errors
//! - [`ClientError`] - Failures reported by the request executor

mod api_error;
mod client_error;
mod config_error;
mod path_error;
mod validation_error;

pub use api_error::ApiError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use path_error::PathError;
pub use validation_error::ValidationError;
