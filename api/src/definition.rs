//! Binding a tree of endpoint definitions to a caller.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::call::CallOptions;
use crate::client::{ApiCaller, RequestExecutor};
use crate::endpoint::Endpoint;
use crate::endpoint_name::EndpointName;
use crate::error::{ApiError, ConfigError};
use crate::response::ApiResponse;

/// A node of an [`ApiDefinition`].
#[derive(Debug, Clone)]
pub enum ApiNode {
    Endpoint(Arc<Endpoint>),
    Group(ApiDefinition),
}

/// An ordered tree of named endpoints and groups.
///
/// ## Examples
///
/// ```rust
/// use api::definition::ApiDefinition;
/// use api::endpoint::Endpoint;
/// use api::path::PathBuilder;
///
/// let users = ApiDefinition::new()
///     .endpoint("list", Endpoint::builder().get(PathBuilder::fixed("users")).build())
///     .endpoint(
///         "get",
///         Endpoint::builder().get(PathBuilder::parse("users/:id").unwrap()).build(),
///     );
/// let definition = ApiDefinition::new().group("users", users);
/// assert_eq!(definition.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ApiDefinition {
    entries: Vec<(String, ApiNode)>,
}

impl ApiDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an endpoint under `name`.
    pub fn endpoint(mut self, name: impl Into<String>, endpoint: Endpoint) -> Self {
        self.entries
            .push((name.into(), ApiNode::Endpoint(Arc::new(endpoint))));
        self
    }

    /// Adds a nested group under `name`.
    pub fn group(mut self, name: impl Into<String>, group: ApiDefinition) -> Self {
        self.entries.push((name.into(), ApiNode::Group(group)));
        self
    }

    pub fn entries(&self) -> &[(String, ApiNode)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Endpoints of an [`ApiDefinition`] bound to an [`ApiCaller`], addressed by
/// dotted name (`users.get`).
#[derive(Debug)]
pub struct Api<E> {
    caller: ApiCaller<E>,
    endpoints: BTreeMap<String, Arc<Endpoint>>,
}

/// Validates `definition` and binds its endpoints to `caller`.
///
/// Every entry name must be a valid [`EndpointName`]. Endpoints without a
/// display name receive their dotted path in the tree.
///
/// ## Examples
///
/// ```rust,ignore
/// let api = build_api(definition, ApiCaller::new(executor))?;
/// let user: User = api.call("users.get", Some(json!({ "id": 1 })), CallOptions::default()).await?;
/// ```
///
/// ## Errors
///
/// - [`ConfigError::MissingField`] if the definition is empty
/// - [`ConfigError::InvalidName`] for an invalid entry name
/// - [`ConfigError::EmptyGroup`] for a group without entries
/// - [`ConfigError::DuplicateEndpoint`] if two entries resolve to the same name
pub fn build_api<E: RequestExecutor>(
    definition: ApiDefinition,
    caller: ApiCaller<E>,
) -> Result<Api<E>, ConfigError> {
    if definition.is_empty() {
        return Err(ConfigError::missing_field("endpoints"));
    }

    let mut endpoints = BTreeMap::new();
    collect(None, definition, &mut endpoints)?;
    debug!(endpoints = endpoints.len(), "built api");

    Ok(Api { caller, endpoints })
}

fn collect(
    prefix: Option<&EndpointName>,
    definition: ApiDefinition,
    endpoints: &mut BTreeMap<String, Arc<Endpoint>>,
) -> Result<(), ConfigError> {
    for (name, node) in definition.entries {
        let segment = EndpointName::new(name)?;
        let full = match prefix {
            Some(prefix) => prefix.join(&segment),
            None => segment,
        };

        match node {
            ApiNode::Endpoint(endpoint) => {
                let endpoint = if endpoint.name().is_some() {
                    endpoint
                } else {
                    Arc::new((*endpoint).clone().with_display_name(full.clone()))
                };
                let key = String::from(full);
                if endpoints.contains_key(&key) {
                    return Err(ConfigError::DuplicateEndpoint { name: key });
                }
                endpoints.insert(key, endpoint);
            }
            ApiNode::Group(group) => {
                if group.is_empty() {
                    return Err(ConfigError::EmptyGroup {
                        name: full.to_string(),
                    });
                }
                collect(Some(&full), group, endpoints)?;
            }
        }
    }
    Ok(())
}

impl<E: RequestExecutor> Api<E> {
    /// Looks up an endpoint by dotted name.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::UnknownEndpoint`] if no endpoint has that name.
    pub fn endpoint(&self, name: &str) -> Result<&Arc<Endpoint>, ConfigError> {
        self.endpoints
            .get(name)
            .ok_or_else(|| ConfigError::UnknownEndpoint {
                name: name.to_string(),
            })
    }

    /// Endpoint names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.endpoints.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn caller(&self) -> &ApiCaller<E> {
        &self.caller
    }

    /// Calls the endpoint `name` and returns the raw response.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::UnknownEndpoint`] for an unknown name, and
    /// otherwise the errors of [`ApiCaller::call_raw`].
    pub async fn call_raw(
        &self,
        name: &str,
        data: Option<Value>,
        options: CallOptions,
    ) -> Result<ApiResponse, ApiError> {
        let endpoint = self.endpoint(name)?;
        self.caller.call_raw(endpoint, data, options).await
    }

    /// Calls the endpoint `name` and decodes the response data.
    ///
    /// ## Errors
    ///
    /// Same as [`call_raw`](Self::call_raw), plus decoding errors.
    pub async fn call<T: DeserializeOwned>(
        &self,
        name: &str,
        data: Option<Value>,
        options: CallOptions,
    ) -> Result<T, ApiError> {
        let endpoint = self.endpoint(name)?;
        self.caller.call(endpoint, data, options).await
    }
}
