use std::fmt;

use thiserror::Error;

/// A validated endpoint display name.
///
/// Display names identify endpoints in diagnostics and in [`Api`](crate::Api)
/// lookups. A name is one or more identifier segments joined by `.`:
/// 1. Each segment must start with an alphabetic character.
/// 2. Remaining characters must be alphanumeric or `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EndpointName(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointNameError {
    #[error("endpoint name cannot be empty")]
    Empty,
    #[error("endpoint name segment must start with an alphabetic character: {0:?}")]
    InvalidStartCharacter(String),
    #[error("endpoint name contains invalid character: '{0}'")]
    InvalidCharacter(char),
}

impl EndpointName {
    /// Validates and wraps a display name.
    pub fn new<S: Into<String>>(name: S) -> Result<Self, EndpointNameError> {
        let s = name.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    fn validate(s: &str) -> Result<(), EndpointNameError> {
        if s.is_empty() {
            return Err(EndpointNameError::Empty);
        }

        for segment in s.split('.') {
            let mut chars = segment.chars();
            match chars.next() {
                Some(c) if c.is_alphabetic() => {}
                _ => return Err(EndpointNameError::InvalidStartCharacter(segment.to_string())),
            }
            if let Some(bad) = chars.find(|c| !c.is_alphanumeric() && *c != '_') {
                return Err(EndpointNameError::InvalidCharacter(bad));
            }
        }

        Ok(())
    }

    /// Appends a child segment, as done when nesting API groups.
    pub fn join(&self, child: &EndpointName) -> EndpointName {
        EndpointName(format!("{}.{}", self.0, child.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EndpointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EndpointName> for String {
    fn from(name: EndpointName) -> Self {
        name.0
    }
}

impl TryFrom<String> for EndpointName {
    type Error = EndpointNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for EndpointName {
    type Error = EndpointNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
