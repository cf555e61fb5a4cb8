//! Path template parsing and rendering errors.

use thiserror::Error;

/// Errors raised while parsing a path pattern or rendering a path.
///
/// The builder checks argument presence and arity itself rather than
/// emitting a malformed URL, so every variant here points at a caller bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The same argument name appears twice in one builder.
    #[error("Duplicate path argument: {name}")]
    DuplicateArgument {
        /// The repeated argument name.
        name: String,
    },

    /// A required argument had no value.
    #[error("Missing required path argument: {name}")]
    MissingArgument {
        /// The argument that was not supplied.
        name: String,
    },

    /// Positional inputs do not line up with the builder's arguments.
    #[error("Expected {expected} positional path arguments, got {actual}")]
    ArityMismatch {
        /// Number of arguments the builder declares.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// A value cannot be rendered into a path segment.
    #[error("Path argument {name} cannot be built from a {kind} value")]
    UnsupportedValue {
        /// The argument being rendered.
        name: String,
        /// Kind of the rejected value (`array`, `object`).
        kind: &'static str,
    },
}

impl PathError {
    /// Creates a missing argument error.
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingArgument { name: name.into() }
    }

    /// Creates a duplicate argument error.
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateArgument { name: name.into() }
    }
}
