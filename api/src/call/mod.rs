//! Call configuration.
//!
//! [`create_config`] takes an endpoint and the caller's input and produces
//! the [`CallConfig`] handed to the request executor. Keys of an object
//! input are routed by name:
//!
//! - keys matching a path argument fill the path,
//! - keys listed in the endpoint's query keys go to the query string,
//! - everything else stays in the request body.
//!
//! Header maps keep the name casing they were given, but names are matched
//! case-insensitively: [`set_header`] replaces `content-type` when
//! `Content-Type` is set.
//!
//! ## Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use api::call::{create_config, CallOptions, DefaultPaths, PathsConfig};
//! use api::endpoint::Endpoint;
//! use api::path::PathBuilder;
//! use serde_json::json;
//!
//! let endpoint = Arc::new(
//!     Endpoint::builder()
//!         .path(PathBuilder::parse("users/:id").unwrap())
//!         .query_keys(["filter"])
//!         .build(),
//! );
//! let paths: Arc<dyn PathsConfig> = Arc::new(DefaultPaths);
//!
//! let parts = create_config(
//!     &paths,
//!     &endpoint,
//!     Some(json!({ "id": 1, "filter": "x", "name": "John" })),
//!     CallOptions::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(parts.config.url, "users/1?filter=x");
//! assert_eq!(parts.result_input, Some(json!({ "name": "John" })));
//! ```

mod options;
mod paths;
mod query;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::method::RestMethod;
use crate::path::PathInputs;

pub use options::{CallOptions, LogMode};
pub use paths::{BaseUrlPaths, DefaultPaths, PathsConfig};
pub use query::{query_pairs, query_string};

/// The request body of a call.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Sent as JSON.
    Json(Value),
    /// Sent as `application/x-www-form-urlencoded` pairs.
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// The JSON payload, if the body is not form-encoded.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Form(_) => None,
        }
    }
}

/// Information about a call that is not part of the request itself.
#[derive(Debug, Clone)]
pub struct CallMeta {
    /// The endpoint being called.
    pub endpoint: Arc<Endpoint>,
    /// Paths configuration the URL was resolved with.
    pub paths: Arc<dyn PathsConfig>,
    pub log: LogMode,
    /// `true` when the call should not toggle a loading indicator.
    pub no_loader: bool,
    /// Free-form options passed through from [`CallOptions::extra`].
    pub extra: Map<String, Value>,
}

/// The request descriptor handed to a [`RequestExecutor`](crate::RequestExecutor).
#[derive(Debug, Clone)]
pub struct CallConfig {
    pub method: RestMethod,
    /// Path (or full URL) including the query string.
    pub url: String,
    /// `None` when there is nothing to send.
    pub data: Option<RequestBody>,
    pub headers: BTreeMap<String, String>,
    pub meta: CallMeta,
}

/// An input split into path, query and body parts.
///
/// Produced by [`split_input`] before any URL is resolved, so
/// `before_config` hooks can inspect the parts of a call that would
/// otherwise fail to build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallInputs {
    /// Values routed to path arguments.
    pub path_inputs: Map<String, Value>,
    /// Non-null values routed to the query string.
    pub query_inputs: Map<String, Value>,
    /// The part of the input left for the body, before body encoding.
    pub body: Option<Value>,
}

/// Everything [`create_config`] derived from the input.
#[derive(Debug, Clone)]
pub struct ConfigParts {
    pub config: CallConfig,
    /// The part of the input left for the body, before body encoding.
    pub result_input: Option<Value>,
    /// Values routed to path arguments.
    pub path_inputs: Map<String, Value>,
    /// Non-null values routed to the query string.
    pub query_inputs: Map<String, Value>,
}

/// Splits the input of a call to `endpoint` into path, query and body parts.
///
/// Query keys are removed from the body even when their value is `null`, but
/// only non-null values reach the query string. An object emptied by the
/// split, and a `null` input, produce no body; any other non-object input is
/// the body unchanged.
pub fn split_input(endpoint: &Endpoint, data: Option<Value>) -> CallInputs {
    let mut path_inputs = Map::new();
    let mut query_inputs = Map::new();

    let body = match data {
        Some(Value::Object(mut input)) => {
            for arg in endpoint.path().args() {
                if let Some(value) = input.remove(&arg.name) {
                    path_inputs.insert(arg.name.clone(), value);
                }
            }
            for key in endpoint.query_keys() {
                match input.remove(key) {
                    Some(Value::Null) | None => {}
                    Some(value) => {
                        query_inputs.insert(key.clone(), value);
                    }
                }
            }
            if input.is_empty() {
                None
            } else {
                Some(Value::Object(input))
            }
        }
        Some(Value::Null) | None => None,
        Some(other) => Some(other),
    };

    CallInputs {
        path_inputs,
        query_inputs,
        body,
    }
}

/// Builds the call configuration for one call of `endpoint`.
///
/// Shorthand for [`split_input`] followed by [`assemble_config`].
///
/// ## Errors
///
/// Same as [`assemble_config`].
pub fn create_config(
    paths: &Arc<dyn PathsConfig>,
    endpoint: &Arc<Endpoint>,
    data: Option<Value>,
    options: CallOptions,
) -> Result<ConfigParts, ApiError> {
    assemble_config(paths, endpoint, split_input(endpoint, data), options)
}

/// Resolves the URL of already split inputs and assembles the [`CallConfig`].
///
/// The method defaults to `GET`, and `no_loader` defaults to `true` exactly
/// for `GET` calls. Endpoint headers are applied first and the headers in
/// `options` override them; header names are compared case-insensitively.
///
/// ## Errors
///
/// Returns [`ApiError::Path`] when the path inputs do not satisfy the
/// endpoint's path builder, or whatever error `paths` reports.
pub fn assemble_config(
    paths: &Arc<dyn PathsConfig>,
    endpoint: &Arc<Endpoint>,
    inputs: CallInputs,
    options: CallOptions,
) -> Result<ConfigParts, ApiError> {
    let CallOptions {
        headers: call_headers,
        log,
        no_loader,
        extra,
    } = options;
    let CallInputs {
        path_inputs,
        query_inputs,
        body: result_input,
    } = inputs;

    let path = paths.get_path(endpoint, &PathInputs::from_json_map(&path_inputs)?)?;
    let url = format!("{path}{}", query_string(&query_inputs, endpoint.query_keys()));

    let method = endpoint.method();

    let mut headers = BTreeMap::new();
    endpoint.apply_headers(&mut headers);
    for (name, value) in call_headers {
        set_header(&mut headers, name, value);
    }

    let data = result_input
        .clone()
        .map(|body| endpoint.encode_body(RequestBody::Json(body)));

    debug!(
        method = %method,
        url = %url,
        path_args = path_inputs.len(),
        query_args = query_inputs.len(),
        has_body = data.is_some(),
        "created call config"
    );

    Ok(ConfigParts {
        config: CallConfig {
            method,
            url,
            data,
            headers,
            meta: CallMeta {
                endpoint: Arc::clone(endpoint),
                paths: Arc::clone(paths),
                log: log.unwrap_or_default(),
                no_loader: no_loader.unwrap_or_else(|| method.is_background_read()),
                extra,
            },
        },
        result_input,
        path_inputs,
        query_inputs,
    })
}

/// Finds the key of a header, comparing names case-insensitively.
pub fn header_key<'a>(headers: &'a BTreeMap<String, String>, name: &str) -> Option<&'a String> {
    headers.keys().find(|key| key.eq_ignore_ascii_case(name))
}

/// Sets a header, replacing any entry whose name differs only in case.
pub fn set_header(
    headers: &mut BTreeMap<String, String>,
    name: impl Into<String>,
    value: impl Into<String>,
) {
    let name = name.into();
    if let Some(existing) = header_key(headers, &name).cloned() {
        headers.remove(&existing);
    }
    headers.insert(name, value.into());
}

/// Sets a header unless one with the same name, in any case, is present.
pub fn set_header_if_absent(
    headers: &mut BTreeMap<String, String>,
    name: impl Into<String>,
    value: impl Into<String>,
) {
    let name = name.into();
    if header_key(headers, &name).is_none() {
        headers.insert(name, value.into());
    }
}
