//! The call pipeline with tracing instrumentation.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{Span, debug, instrument};

use super::RequestExecutor;
use crate::call::{
    BaseUrlPaths, CallConfig, CallOptions, ConfigParts, DefaultPaths, LogMode, PathsConfig,
    assemble_config, set_header, set_header_if_absent, split_input,
};
use crate::endpoint::Endpoint;
use crate::error::{ApiError, ClientError, ConfigError};
use crate::hooks::{CallerHooks, ConfigContext};
use crate::response::ApiResponse;

/// Builder for configuring an [`ApiCaller`].
#[derive(Debug)]
pub struct ApiCallerBuilder<E> {
    executor: E,
    paths: Arc<dyn PathsConfig>,
    hooks: CallerHooks,
    default_headers: BTreeMap<String, String>,
    log: LogMode,
}

impl<E: RequestExecutor> ApiCallerBuilder<E> {
    fn new(executor: E) -> Self {
        Self {
            executor,
            paths: Arc::new(DefaultPaths),
            hooks: CallerHooks::new(),
            default_headers: BTreeMap::new(),
            log: LogMode::Off,
        }
    }

    /// Sets how endpoint paths become URLs. Defaults to [`DefaultPaths`].
    pub fn paths(mut self, paths: impl PathsConfig + 'static) -> Self {
        self.paths = Arc::new(paths);
        self
    }

    /// Prefixes every endpoint path with `base`.
    ///
    /// ## Errors
    ///
    /// Returns an error if `base` is not a URL that can carry a path.
    pub fn base_url(self, base: &str) -> Result<Self, ApiError> {
        Ok(self.paths(BaseUrlPaths::new(base)?))
    }

    /// Adds hooks that run for every call, before endpoint hooks.
    ///
    /// Repeated calls chain the hooks in registration order.
    pub fn hooks(mut self, hooks: CallerHooks) -> Self {
        self.hooks = CallerHooks::merge([self.hooks, hooks]);
        self
    }

    /// Adds a default header to all requests.
    ///
    /// Endpoint and per-call headers of the same name take precedence.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// let caller = ApiCaller::builder(executor)
    ///     .default_header("X-Custom-Header", "value")?
    ///     .build();
    /// ```
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ApiError> {
        let name = name.as_ref();
        let value = value.as_ref();
        if name.is_empty() || !name.chars().all(is_token_char) {
            return Err(ConfigError::InvalidHeader {
                name: name.to_string(),
                reason: "invalid header name",
            }
            .into());
        }
        if value.chars().any(|c| c.is_control() && c != '\t') {
            return Err(ConfigError::InvalidHeader {
                name: name.to_string(),
                reason: "invalid header value",
            }
            .into());
        }
        set_header(&mut self.default_headers, name, value);
        Ok(self)
    }

    /// Sets the log mode used when a call does not choose one.
    pub fn log(mut self, log: LogMode) -> Self {
        self.log = log;
        self
    }

    /// Builds the [`ApiCaller`].
    pub fn build(self) -> ApiCaller<E> {
        ApiCaller {
            executor: self.executor,
            paths: self.paths,
            hooks: self.hooks,
            default_headers: self.default_headers,
            log: self.log,
        }
    }
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
}

/// Calls endpoints through a [`RequestExecutor`].
///
/// A call runs these steps, stopping at the first error:
///
/// 1. [`split_input`] splits the input into path, query and body parts
/// 2. `before_config` hooks (caller hooks, then endpoint hooks) inspect the split
/// 3. [`assemble_config`] resolves the URL and builds the [`CallConfig`]
/// 4. `before_request` hooks edit or replace the [`CallConfig`]
/// 5. the executor issues the request
/// 6. `after_response` hooks edit or replace the [`ApiResponse`]
/// 7. a non-success status becomes [`ClientError::HttpStatus`]
///
/// Errors from steps 5 to 7 pass through the endpoint's error processor;
/// earlier errors, including validation failures, reach the caller
/// unchanged.
///
/// ## Examples
///
/// ```rust,ignore
/// use api::call::CallOptions;
///
/// let caller = ApiCaller::builder(executor).build();
/// let response = caller
///     .call_raw(&endpoint, Some(json!({ "id": 1 })), CallOptions::default())
///     .await?;
/// assert!(response.is_success());
/// ```
#[derive(Debug)]
pub struct ApiCaller<E> {
    executor: E,
    paths: Arc<dyn PathsConfig>,
    hooks: CallerHooks,
    default_headers: BTreeMap<String, String>,
    log: LogMode,
}

impl<E: RequestExecutor> ApiCaller<E> {
    /// Creates a new builder around `executor`.
    pub fn builder(executor: E) -> ApiCallerBuilder<E> {
        ApiCallerBuilder::new(executor)
    }

    /// Creates a caller with default settings.
    pub fn new(executor: E) -> Self {
        Self::builder(executor).build()
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn paths(&self) -> &Arc<dyn PathsConfig> {
        &self.paths
    }

    pub fn hooks(&self) -> &CallerHooks {
        &self.hooks
    }

    /// Calls `endpoint` and returns the raw response.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The input does not satisfy the endpoint's path
    /// - A hook or validator rejects the call
    /// - The executor fails
    /// - The response status is not 2xx
    #[instrument(
        name = "api_call",
        skip(self, endpoint, data, options),
        fields(
            api.endpoint = tracing::field::Empty,
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn call_raw(
        &self,
        endpoint: &Arc<Endpoint>,
        data: Option<Value>,
        options: CallOptions,
    ) -> Result<ApiResponse, ApiError> {
        if let Some(name) = endpoint.name() {
            Span::current().record("api.endpoint", name.as_str());
        }

        let options = CallOptions {
            log: options.log.or(Some(self.log)),
            ..options
        };
        let hooks = CallerHooks::merge([&self.hooks, endpoint.hooks()]);

        let input = data.clone();
        let inputs = split_input(endpoint, data);
        let context = ConfigContext {
            endpoint: Arc::clone(endpoint),
            input,
            body: inputs.body.clone(),
            path_inputs: inputs.path_inputs.clone(),
            query_inputs: inputs.query_inputs.clone(),
        };
        hooks.run_before_config(&context).await?;

        let ConfigParts { mut config, .. } =
            assemble_config(&self.paths, endpoint, inputs, options)?;
        for (name, value) in &self.default_headers {
            set_header_if_absent(&mut config.headers, name.as_str(), value.as_str());
        }
        hooks.run_before_request(&mut config).await?;

        Span::current().record("http.method", config.method.as_str());
        Span::current().record("http.url", config.url.as_str());

        match config.meta.log {
            LogMode::Off => {}
            LogMode::Brief => debug!(method = %config.method, url = %config.url, "api request"),
            LogMode::Full => debug!(
                method = %config.method,
                url = %config.url,
                headers = ?config.headers,
                body = ?config.data,
                "api request"
            ),
        }

        self.dispatch(&hooks, &config)
            .await
            .map_err(|err| endpoint.process_error(err))
    }

    /// Calls `endpoint` and decodes the response data into `T`.
    ///
    /// ## Errors
    ///
    /// Same as [`call_raw`](Self::call_raw), plus
    /// [`ValidationError::Decode`](crate::error::ValidationError::Decode) if
    /// the data does not match `T`.
    pub async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &Arc<Endpoint>,
        data: Option<Value>,
        options: CallOptions,
    ) -> Result<T, ApiError> {
        let response = self.call_raw(endpoint, data, options).await?;
        Ok(response.decode()?)
    }

    async fn dispatch(
        &self,
        hooks: &CallerHooks,
        config: &CallConfig,
    ) -> Result<ApiResponse, ApiError> {
        let mut response = self.executor.execute(config).await?;
        hooks.run_after_response(config, &mut response).await?;

        let status = response.status;
        Span::current().record("http.status_code", status);

        match config.meta.log {
            LogMode::Off => {}
            LogMode::Brief => debug!(status, "api response"),
            LogMode::Full => debug!(status, data = %response.data, "api response"),
        }

        if !response.is_success() {
            let otel_status = if status >= 500 { "ERROR" } else { "UNSET" };
            Span::current().record("otel.status_code", otel_status);

            return Err(ClientError::HttpStatus {
                status,
                message: response.error_message(),
            }
            .into());
        }

        Span::current().record("otel.status_code", "OK");
        Ok(response)
    }
}
