//! Input validation and response decoding errors.

use thiserror::Error;

/// Errors from endpoint validators and response decoding.
///
/// Validators attached to an endpoint return these to abort a call before
/// the request is issued; the caller receives the error unchanged.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The input was rejected as a whole.
    #[error("Invalid input: {message}")]
    Invalid {
        /// Why the input was rejected.
        message: String,
    },

    /// A single field was rejected.
    #[error("Invalid field {field}: {message}")]
    Field {
        /// The offending field.
        field: String,
        /// Why the field was rejected.
        message: String,
    },

    /// Response data could not be decoded into the requested type.
    #[error("Response decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ValidationError {
    /// Creates an input-level validation error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Creates a field-level validation error.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Field {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this error came from decoding a response.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_display() {
        let err = ValidationError::field("email", "must not be empty");
        assert_eq!(err.to_string(), "Invalid field email: must not be empty");
        assert!(!err.is_decode_error());
    }

    #[test]
    fn test_decode_is_decode_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err = ValidationError::from(json_err);
        assert!(err.is_decode_error());
    }
}
