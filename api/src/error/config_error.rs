//! Endpoint and API definition errors.

use thiserror::Error;

use crate::endpoint_name::EndpointNameError;

/// Errors in endpoint or API definitions.
///
/// These errors occur while assembling definitions, typically indicating
/// programmer errors. They are raised before any request is attempted.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL cannot carry a path.
    #[error("Base URL cannot be a base: {url}")]
    CannotBeBase {
        /// The rejected URL.
        url: String,
    },

    /// A required definition field is missing.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A default header has an invalid name or value.
    #[error("Invalid header {name}: {reason}")]
    InvalidHeader {
        /// The header name as given.
        name: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Endpoint or group name validation failed.
    #[error("Invalid endpoint name: {0}")]
    InvalidName(#[from] EndpointNameError),

    /// An API group contains no endpoints.
    #[error("API group {name} has no endpoints")]
    EmptyGroup {
        /// Dotted path of the empty group.
        name: String,
    },

    /// Duplicate endpoint name detected.
    #[error("Duplicate endpoint: {name}")]
    DuplicateEndpoint {
        /// The duplicate endpoint name.
        name: String,
    },

    /// No endpoint is registered under the requested name.
    #[error("Unknown endpoint: {name}")]
    UnknownEndpoint {
        /// The requested name.
        name: String,
    },
}

impl ConfigError {
    /// Creates a missing field error.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field() {
        let err = ConfigError::missing_field("path");
        assert_eq!(err.to_string(), "Missing required field: path");
    }

    #[test]
    fn test_invalid_url() {
        let url_err = url::Url::parse("not-a-url").unwrap_err();
        let err = ConfigError::InvalidUrl(url_err);
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_duplicate_endpoint() {
        let err = ConfigError::DuplicateEndpoint {
            name: "users.get".to_string(),
        };
        assert_eq!(err.to_string(), "Duplicate endpoint: users.get");
    }
}
