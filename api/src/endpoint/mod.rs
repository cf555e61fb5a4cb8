//! Endpoint definitions with a type-state builder.
//!
//! An [`Endpoint`] describes one API operation: its method, path builder,
//! which input keys go to the query string, and a set of capability
//! [extensions](extensions). It is immutable once built and shared as
//! `Arc<Endpoint>` by call configurations.

pub mod extensions;

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::call::{RequestBody, set_header};
use crate::endpoint_name::EndpointName;
use crate::error::{ApiError, ConfigError, ValidationError};
use crate::hooks::{CallerHooks, ConfigContext};
use crate::method::RestMethod;
use crate::path::PathBuilder;

pub use extensions::{
    ContentType, EndpointExtension, EndpointHooks, FormEncoded, StaticHeaders, Validator,
};

/// Marker types for builder state tracking.
pub mod builder_state {
    /// Marker for a field that has not been set.
    pub struct Missing;
    /// Marker for a field that has been set.
    pub struct Present;
}

use builder_state::{Missing, Present};

/// Maps errors raised after the call configuration was built.
pub type ErrorProcessor = Arc<dyn Fn(ApiError) -> ApiError + Send + Sync>;

/// A single API operation.
///
/// ## Examples
///
/// ```rust
/// use api::endpoint::Endpoint;
/// use api::path::PathBuilder;
/// use api::RestMethod;
///
/// let endpoint = Endpoint::builder()
///     .patch(PathBuilder::parse("users/:id").unwrap())
///     .query_keys(["notify"])
///     .content_type("application/merge-patch+json")
///     .build();
///
/// assert_eq!(endpoint.method(), RestMethod::Patch);
/// assert_eq!(endpoint.content_type(), Some("application/merge-patch+json"));
/// assert!(!endpoint.is_form());
/// ```
#[derive(Clone)]
pub struct Endpoint {
    method: Option<RestMethod>,
    path: PathBuilder,
    query_keys: Vec<String>,
    display_name: Option<EndpointName>,
    description: Option<String>,
    error_processor: Option<ErrorProcessor>,
    extensions: Vec<Arc<dyn EndpointExtension>>,
    hooks: CallerHooks,
}

impl Endpoint {
    /// Creates a new endpoint builder.
    pub fn builder() -> EndpointBuilder<Missing> {
        EndpointBuilder::new()
    }

    /// The HTTP method, `GET` when none was declared.
    pub fn method(&self) -> RestMethod {
        self.method.unwrap_or_default()
    }

    /// The HTTP method as declared.
    pub fn declared_method(&self) -> Option<RestMethod> {
        self.method
    }

    pub fn path(&self) -> &PathBuilder {
        &self.path
    }

    /// Input keys sent in the query string, in query-string order.
    pub fn query_keys(&self) -> &[String] {
        &self.query_keys
    }

    /// The display name; [`build_api`](crate::build_api) assigns the
    /// dotted definition path to endpoints that have none.
    pub fn name(&self) -> Option<&EndpointName> {
        self.display_name.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Looks up an extension by type.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use api::endpoint::{Endpoint, FormEncoded};
    /// use api::path::PathBuilder;
    ///
    /// let login = Endpoint::builder()
    ///     .post(PathBuilder::fixed("login"))
    ///     .as_form()
    ///     .build();
    /// assert!(login.extension::<FormEncoded>().is_some());
    /// ```
    pub fn extension<T: EndpointExtension>(&self) -> Option<&T> {
        self.extensions
            .iter()
            .find_map(|ext| ext.as_any().downcast_ref::<T>())
    }

    pub fn extensions(&self) -> impl Iterator<Item = &dyn EndpointExtension> {
        self.extensions.iter().map(|ext| ext.as_ref())
    }

    /// The explicit content type, if one was set.
    pub fn content_type(&self) -> Option<&str> {
        self.extension::<ContentType>().map(|ct| ct.0.as_str())
    }

    /// Returns `true` if object bodies are sent form-encoded.
    pub fn is_form(&self) -> bool {
        self.extension::<FormEncoded>().is_some()
    }

    pub fn has_validator(&self) -> bool {
        self.extension::<Validator>().is_some()
    }

    /// Hooks contributed by the endpoint's extensions, merged in
    /// registration order.
    pub fn hooks(&self) -> &CallerHooks {
        &self.hooks
    }

    /// Adds the headers of every extension, in registration order.
    pub fn apply_headers(&self, headers: &mut BTreeMap<String, String>) {
        for ext in &self.extensions {
            ext.apply_headers(headers);
        }
    }

    /// Passes the body through every extension, in registration order.
    pub fn encode_body(&self, body: RequestBody) -> RequestBody {
        self.extensions
            .iter()
            .fold(body, |body, ext| ext.encode_body(body))
    }

    /// Applies the error processor, if any.
    pub fn process_error(&self, err: ApiError) -> ApiError {
        match &self.error_processor {
            Some(processor) => processor(err),
            None => err,
        }
    }

    pub(crate) fn with_display_name(mut self, name: EndpointName) -> Self {
        self.display_name = Some(name);
        self
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("method", &self.method())
            .field("path", &self.path.template())
            .field("query_keys", &self.query_keys)
            .field("display_name", &self.display_name)
            .field("extensions", &self.extensions)
            .field("error_processor", &self.error_processor.is_some())
            .finish()
    }
}

/// Type-state builder for [`Endpoint`].
///
/// The path is required; [`build`](EndpointBuilder::build) is only
/// available once it was set with [`path`](EndpointBuilder::path) or one of
/// the method shorthands.
pub struct EndpointBuilder<Path> {
    method: Option<RestMethod>,
    path: Option<PathBuilder>,
    query_keys: Vec<String>,
    display_name: Option<EndpointName>,
    description: Option<String>,
    error_processor: Option<ErrorProcessor>,
    extensions: Vec<Arc<dyn EndpointExtension>>,
    headers: BTreeMap<String, String>,
    _phantom: PhantomData<Path>,
}

impl EndpointBuilder<Missing> {
    /// Creates a new endpoint builder with no fields set.
    pub fn new() -> Self {
        Self {
            method: None,
            path: None,
            query_keys: Vec::new(),
            display_name: None,
            description: None,
            error_processor: None,
            extensions: Vec::new(),
            headers: BTreeMap::new(),
            _phantom: PhantomData,
        }
    }

    /// Sets the path builder.
    pub fn path(self, path: PathBuilder) -> EndpointBuilder<Present> {
        EndpointBuilder {
            method: self.method,
            path: Some(path),
            query_keys: self.query_keys,
            display_name: self.display_name,
            description: self.description,
            error_processor: self.error_processor,
            extensions: self.extensions,
            headers: self.headers,
            _phantom: PhantomData,
        }
    }

    pub fn get(self, path: PathBuilder) -> EndpointBuilder<Present> {
        self.method(RestMethod::Get).path(path)
    }

    pub fn post(self, path: PathBuilder) -> EndpointBuilder<Present> {
        self.method(RestMethod::Post).path(path)
    }

    pub fn put(self, path: PathBuilder) -> EndpointBuilder<Present> {
        self.method(RestMethod::Put).path(path)
    }

    pub fn patch(self, path: PathBuilder) -> EndpointBuilder<Present> {
        self.method(RestMethod::Patch).path(path)
    }

    pub fn delete(self, path: PathBuilder) -> EndpointBuilder<Present> {
        self.method(RestMethod::Delete).path(path)
    }
}

impl Default for EndpointBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

// Setters available in any state
impl<P> EndpointBuilder<P> {
    /// Sets the HTTP method.
    pub fn method(mut self, method: RestMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the input keys routed to the query string.
    pub fn query_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the display name.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidName`] unless every dot-separated part
    /// starts with a letter and contains only letters, digits and `_`.
    pub fn display_name(mut self, name: impl Into<String>) -> Result<Self, ConfigError> {
        self.display_name = Some(EndpointName::new(name)?);
        Ok(self)
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Maps errors of calls to this endpoint before they reach the caller.
    pub fn error_processor<F>(mut self, processor: F) -> Self
    where
        F: Fn(ApiError) -> ApiError + Send + Sync + 'static,
    {
        self.error_processor = Some(Arc::new(processor));
        self
    }

    /// Sends a fixed `Content-Type` header.
    pub fn content_type(self, content_type: impl Into<String>) -> Self {
        self.extension(ContentType(content_type.into()))
    }

    /// Sends object bodies form-encoded.
    pub fn as_form(self) -> Self {
        self.extension(FormEncoded)
    }

    /// Validates the routed input before every call.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use api::endpoint::Endpoint;
    /// use api::error::ValidationError;
    /// use api::path::PathBuilder;
    ///
    /// let create = Endpoint::builder()
    ///     .post(PathBuilder::fixed("users"))
    ///     .validate(|ctx| match ctx.body.as_ref().and_then(|b| b.get("email")) {
    ///         Some(_) => Ok(()),
    ///         None => Err(ValidationError::field("email", "is required")),
    ///     })
    ///     .build();
    /// assert!(create.has_validator());
    /// ```
    pub fn validate<F>(self, validate: F) -> Self
    where
        F: Fn(&ConfigContext) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.extension(Validator::new(validate))
    }

    /// Adds hooks that run for every call, after the caller's hooks.
    pub fn hooks(self, hooks: CallerHooks) -> Self {
        self.extension(EndpointHooks(hooks))
    }

    /// Adds a header sent with every call.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        set_header(&mut self.headers, name, value);
        self
    }

    /// Attaches a custom extension.
    pub fn extension<X: EndpointExtension>(mut self, extension: X) -> Self {
        self.extensions.push(Arc::new(extension));
        self
    }
}

impl EndpointBuilder<Present> {
    /// Builds the [`Endpoint`].
    pub fn build(self) -> Endpoint {
        let mut extensions = self.extensions;
        if !self.headers.is_empty() {
            extensions.push(Arc::new(StaticHeaders(self.headers)));
        }
        let hooks = CallerHooks::merge(extensions.iter().filter_map(|ext| ext.hooks()));

        Endpoint {
            method: self.method,
            path: self.path.unwrap_or_else(|| PathBuilder::fixed("")),
            query_keys: self.query_keys,
            display_name: self.display_name,
            description: self.description,
            error_processor: self.error_processor,
            extensions,
            hooks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClientError, PathError};
    use serde_json::Value;

    fn validation_context(endpoint: Arc<Endpoint>, body: Option<Value>) -> ConfigContext {
        ConfigContext {
            endpoint,
            input: body.clone(),
            body,
            path_inputs: Default::default(),
            query_inputs: Default::default(),
        }
    }

    fn items() -> PathBuilder {
        PathBuilder::fixed("items")
    }

    #[test]
    fn test_method_defaults_to_get() {
        let endpoint = Endpoint::builder().path(items()).build();
        assert_eq!(endpoint.declared_method(), None);
        assert_eq!(endpoint.method(), RestMethod::Get);
    }

    #[test]
    fn test_method_shorthands() {
        assert_eq!(Endpoint::builder().delete(items()).build().method(), RestMethod::Delete);
        assert_eq!(Endpoint::builder().put(items()).build().method(), RestMethod::Put);
        assert_eq!(
            Endpoint::builder()
                .method(RestMethod::Head)
                .path(items())
                .build()
                .method(),
            RestMethod::Head
        );
    }

    #[test]
    fn test_display_name_is_validated() {
        assert!(Endpoint::builder().display_name("users.get").is_ok());
        let err = Endpoint::builder().display_name("1users").err().unwrap();
        assert!(matches!(err, ConfigError::InvalidName(_)));
    }

    #[test]
    fn test_extension_lookup() {
        let endpoint = Endpoint::builder()
            .post(items())
            .content_type("text/csv")
            .header("X-Api", "2")
            .build();
        assert_eq!(endpoint.content_type(), Some("text/csv"));
        assert!(!endpoint.is_form());
        assert!(!endpoint.has_validator());
        let headers = endpoint.extension::<StaticHeaders>().unwrap();
        assert_eq!(headers.0["X-Api"], "2");
        assert_eq!(endpoint.extensions().count(), 2);
    }

    #[test]
    fn test_explicit_header_wins_over_content_type() {
        let endpoint = Endpoint::builder()
            .post(items())
            .as_form()
            .header("Content-Type", "application/custom")
            .build();
        let mut headers = BTreeMap::new();
        endpoint.apply_headers(&mut headers);
        assert_eq!(headers["Content-Type"], "application/custom");
    }

    #[test]
    fn test_extension_hooks_are_merged() {
        let endpoint = Endpoint::builder()
            .post(items())
            .validate(|_| Ok(()))
            .hooks(CallerHooks::new().after_response(|_, _| Box::pin(async { Ok(None) })))
            .build();
        assert!(endpoint.hooks().has_before_config());
        assert!(!endpoint.hooks().has_before_request());
        assert!(endpoint.hooks().has_after_response());
    }

    #[test]
    fn test_no_extensions_no_hooks() {
        let endpoint = Endpoint::builder().path(items()).build();
        assert!(endpoint.hooks().is_empty());
    }

    #[test]
    fn test_error_processor() {
        let endpoint = Endpoint::builder()
            .path(items())
            .error_processor(|err| match err {
                ApiError::Client(ClientError::HttpStatus { status: 404, .. }) => {
                    ApiError::hook("not found")
                }
                other => other,
            })
            .build();

        let mapped = endpoint.process_error(
            ClientError::HttpStatus {
                status: 404,
                message: "gone".to_string(),
            }
            .into(),
        );
        assert!(matches!(mapped, ApiError::Hook(_)));

        let untouched = endpoint.process_error(PathError::missing("id").into());
        assert!(matches!(untouched, ApiError::Path(_)));
    }

    #[test]
    fn test_validator_check() {
        let endpoint = Arc::new(
            Endpoint::builder()
                .post(items())
                .validate(|ctx| {
                    if ctx.body.is_some() {
                        Ok(())
                    } else {
                        Err(ValidationError::invalid("body required"))
                    }
                })
                .build(),
        );
        let validator = endpoint.extension::<Validator>().unwrap();
        let empty = validation_context(Arc::clone(&endpoint), None);
        assert!(validator.check(&empty).is_err());
        let filled = validation_context(Arc::clone(&endpoint), Some(serde_json::json!({ "a": 1 })));
        assert!(validator.check(&filled).is_ok());
    }
}
