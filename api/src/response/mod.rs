//! Responses returned by a request executor.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ValidationError;

/// A response as seen by `after_response` hooks and callers.
///
/// Executors parse the wire body into `data`; the crate only inspects the
/// status and hands `data` to serde when a typed result is requested.
///
/// ## Examples
///
/// ```rust
/// use api::ApiResponse;
/// use serde_json::json;
///
/// #[derive(serde::Deserialize)]
/// struct User { id: u64 }
///
/// let response = ApiResponse::ok(json!({ "id": 1 }));
/// let user: User = response.decode().unwrap();
/// assert_eq!(user.id, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: BTreeMap<String, String>,
    /// Parsed response body.
    pub data: Value,
}

impl ApiResponse {
    pub fn new(status: u16, data: Value) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            data,
        }
    }

    /// A `200` response.
    pub fn ok(data: Value) -> Self {
        Self::new(200, data)
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Message used when the status is an error: the body text, or the
    /// body's `message` field, or the serialized body.
    pub fn error_message(&self) -> String {
        match &self.data {
            Value::String(s) => s.clone(),
            Value::Object(map) => match map.get("message") {
                Some(Value::String(s)) => s.clone(),
                _ => self.data.to_string(),
            },
            Value::Null => format!("status {}", self.status),
            other => other.to_string(),
        }
    }

    /// Deserializes `data` into `T`.
    ///
    /// ## Errors
    ///
    /// Returns [`ValidationError::Decode`] if `data` does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ValidationError> {
        Ok(T::deserialize(&self.data)?)
    }
}
