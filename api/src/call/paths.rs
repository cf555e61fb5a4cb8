//! Turning an endpoint and its path inputs into a URL.

use std::fmt;

use url::Url;

use crate::endpoint::Endpoint;
use crate::error::{ApiError, ConfigError};
use crate::path::{CombineOptions, PathInputs, combine_urls};

/// Resolves the URL path of a call.
///
/// The default implementation renders the endpoint's own path builder.
/// Implementations can prefix a base URL or rewrite paths per environment.
pub trait PathsConfig: fmt::Debug + Send + Sync {
    /// Returns the path (or full URL) for `endpoint`, without query string.
    ///
    /// ## Errors
    ///
    /// Returns [`ApiError::Path`] when the inputs do not satisfy the
    /// endpoint's path builder.
    fn get_path(&self, endpoint: &Endpoint, inputs: &PathInputs) -> Result<String, ApiError>;
}

/// Renders the endpoint path as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultPaths;

impl PathsConfig for DefaultPaths {
    fn get_path(&self, endpoint: &Endpoint, inputs: &PathInputs) -> Result<String, ApiError> {
        Ok(endpoint.path().build(inputs)?)
    }
}

/// Prefixes every endpoint path with a base URL.
///
/// ## Examples
///
/// ```rust
/// use api::call::BaseUrlPaths;
///
/// assert!(BaseUrlPaths::new("https://api.example.com/v1/").is_ok());
/// assert!(BaseUrlPaths::new("mailto:someone@example.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrlPaths {
    base: Url,
}

impl BaseUrlPaths {
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if `base` does not parse and
    /// [`ConfigError::CannotBeBase`] if it cannot carry a path.
    pub fn new(base: &str) -> Result<Self, ConfigError> {
        let base = Url::parse(base)?;
        if base.cannot_be_a_base() {
            return Err(ConfigError::CannotBeBase {
                url: base.to_string(),
            });
        }
        Ok(Self { base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }
}

impl PathsConfig for BaseUrlPaths {
    fn get_path(&self, endpoint: &Endpoint, inputs: &PathInputs) -> Result<String, ApiError> {
        let path = endpoint.path().build(inputs)?;
        Ok(combine_urls(
            [self.base.as_str().trim_end_matches('/'), path.as_str()],
            &CombineOptions::default().without_trim(),
        ))
    }
}
