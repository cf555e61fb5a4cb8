//! Capability extensions for endpoints.
//!
//! Each extension is a concrete type implementing [`EndpointExtension`].
//! Call configuration consults every extension through the trait, and code
//! that needs to know whether an endpoint has a capability asks for the
//! concrete type with [`Endpoint::extension`](super::Endpoint::extension).

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::call::{RequestBody, query_pairs, set_header, set_header_if_absent};
use crate::error::{ApiError, ValidationError};
use crate::hooks::{CallerHooks, ConfigContext};

/// A capability attached to an endpoint.
///
/// All methods have no-op defaults; an extension overrides the ones it
/// contributes to.
pub trait EndpointExtension: Any + fmt::Debug + Send + Sync {
    /// Adds headers to every call of the endpoint.
    fn apply_headers(&self, _headers: &mut BTreeMap<String, String>) {}

    /// Hooks that run for every call of the endpoint.
    fn hooks(&self) -> Option<&CallerHooks> {
        None
    }

    /// Re-encodes the request body.
    fn encode_body(&self, body: RequestBody) -> RequestBody {
        body
    }

    fn as_any(&self) -> &dyn Any;
}

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Sends a fixed `Content-Type` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType(pub String);

impl EndpointExtension for ContentType {
    fn apply_headers(&self, headers: &mut BTreeMap<String, String>) {
        set_header(headers, CONTENT_TYPE_HEADER, self.0.as_str());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Sends object bodies as `application/x-www-form-urlencoded` pairs.
///
/// An explicit [`ContentType`] on the same endpoint wins over the form
/// content type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormEncoded;

impl EndpointExtension for FormEncoded {
    fn apply_headers(&self, headers: &mut BTreeMap<String, String>) {
        set_header_if_absent(headers, CONTENT_TYPE_HEADER, FORM_CONTENT_TYPE);
    }

    fn encode_body(&self, body: RequestBody) -> RequestBody {
        match body {
            RequestBody::Json(serde_json::Value::Object(map)) => {
                RequestBody::Form(query_pairs(map.iter()))
            }
            other => other,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Headers sent with every call of the endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticHeaders(pub BTreeMap<String, String>);

impl EndpointExtension for StaticHeaders {
    fn apply_headers(&self, headers: &mut BTreeMap<String, String>) {
        for (name, value) in &self.0 {
            set_header(headers, name.as_str(), value.as_str());
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Per-endpoint hooks, merged after the caller's own hooks.
#[derive(Debug, Clone, Default)]
pub struct EndpointHooks(pub CallerHooks);

impl EndpointExtension for EndpointHooks {
    fn hooks(&self) -> Option<&CallerHooks> {
        Some(&self.0)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub type ValidateFn = Arc<dyn Fn(&ConfigContext) -> Result<(), ValidationError> + Send + Sync>;

/// Input validation run in the `before_config` slot.
///
/// A failing validator aborts the call before the request is issued and the
/// caller receives the [`ValidationError`] unchanged.
#[derive(Clone)]
pub struct Validator {
    validate: ValidateFn,
    hooks: CallerHooks,
}

impl Validator {
    pub fn new<F>(validate: F) -> Self
    where
        F: Fn(&ConfigContext) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        let validate: ValidateFn = Arc::new(validate);
        let hook_validate = Arc::clone(&validate);
        let hooks = CallerHooks::new().before_config(move |context| {
            let result = hook_validate(context).map_err(ApiError::from);
            Box::pin(async move { result })
        });
        Self { validate, hooks }
    }

    /// Runs the validator directly.
    pub fn check(&self, context: &ConfigContext) -> Result<(), ValidationError> {
        (self.validate)(context)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

impl EndpointExtension for Validator {
    fn hooks(&self) -> Option<&CallerHooks> {
        Some(&self.hooks)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
