//! Cross-cutting call hooks and their composition.
//!
//! A [`CallerHooks`] set has three optional slots:
//!
//! - `before_config` - runs after the input was split into path, query and
//!   body parts and before the request is issued. Validators live here; a
//!   returned error aborts the call.
//! - `before_request` - receives the [`CallConfig`] and may edit it in place
//!   or return a replacement.
//! - `after_response` - same contract over the [`ApiResponse`].
//!
//! [`CallerHooks::merge`] composes several sets into one. Hooks of the same
//! slot run strictly one after another, in registration order, and each
//! sees the edits of the previous ones.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::{Map, Value};
use tracing::trace;

use crate::call::CallConfig;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::response::ApiResponse;

/// What a `before_config` hook gets to look at.
#[derive(Debug, Clone)]
pub struct ConfigContext {
    /// The endpoint being called.
    pub endpoint: Arc<Endpoint>,
    /// The input exactly as the caller passed it.
    pub input: Option<Value>,
    /// What is left for the request body.
    pub body: Option<Value>,
    /// Values routed to path arguments.
    pub path_inputs: Map<String, Value>,
    /// Values routed to the query string.
    pub query_inputs: Map<String, Value>,
}

pub type BeforeConfigHook =
    Arc<dyn for<'a> Fn(&'a ConfigContext) -> BoxFuture<'a, Result<(), ApiError>> + Send + Sync>;

pub type BeforeRequestHook = Arc<
    dyn for<'a> Fn(&'a mut CallConfig) -> BoxFuture<'a, Result<Option<CallConfig>, ApiError>>
        + Send
        + Sync,
>;

pub type AfterResponseHook = Arc<
    dyn for<'a> Fn(
            &'a CallConfig,
            &'a mut ApiResponse,
        ) -> BoxFuture<'a, Result<Option<ApiResponse>, ApiError>>
        + Send
        + Sync,
>;

/// A set of optional hooks, one per slot.
///
/// ## Examples
///
/// ```rust
/// use api::CallerHooks;
///
/// let auth = CallerHooks::new().before_request(|config| {
///     Box::pin(async move {
///         config.headers.insert("Authorization".into(), "Bearer token".into());
///         Ok(None)
///     })
/// });
/// let trace = CallerHooks::new().before_request(|config| {
///     Box::pin(async move {
///         config.headers.insert("X-Trace".into(), "1".into());
///         Ok(None)
///     })
/// });
///
/// let merged = CallerHooks::merge([auth, trace]);
/// assert!(merged.has_before_request());
/// assert!(!merged.has_after_response());
/// ```
#[derive(Clone, Default)]
pub struct CallerHooks {
    before_config: Option<BeforeConfigHook>,
    before_request: Option<BeforeRequestHook>,
    after_response: Option<AfterResponseHook>,
}

impl CallerHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `before_config` slot.
    pub fn before_config<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(&'a ConfigContext) -> BoxFuture<'a, Result<(), ApiError>>
            + Send
            + Sync
            + 'static,
    {
        self.before_config = Some(Arc::new(hook));
        self
    }

    /// Sets the `before_request` slot.
    ///
    /// The hook may edit the config in place; returning `Some` replaces it.
    pub fn before_request<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(&'a mut CallConfig) -> BoxFuture<'a, Result<Option<CallConfig>, ApiError>>
            + Send
            + Sync
            + 'static,
    {
        self.before_request = Some(Arc::new(hook));
        self
    }

    /// Sets the `after_response` slot.
    ///
    /// The hook may edit the response in place; returning `Some` replaces it.
    pub fn after_response<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(
                &'a CallConfig,
                &'a mut ApiResponse,
            ) -> BoxFuture<'a, Result<Option<ApiResponse>, ApiError>>
            + Send
            + Sync
            + 'static,
    {
        self.after_response = Some(Arc::new(hook));
        self
    }

    pub fn has_before_config(&self) -> bool {
        self.before_config.is_some()
    }

    pub fn has_before_request(&self) -> bool {
        self.before_request.is_some()
    }

    pub fn has_after_response(&self) -> bool {
        self.after_response.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_before_config() && !self.has_before_request() && !self.has_after_response()
    }

    /// Merges hook sets into one.
    ///
    /// Per slot, the hooks present are chained in iteration order; sets that
    /// leave a slot empty contribute nothing to it, and a slot that no set
    /// fills stays empty.
    pub fn merge<I>(sets: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<CallerHooks>,
    {
        let mut before_config = Vec::new();
        let mut before_request = Vec::new();
        let mut after_response = Vec::new();

        for set in sets {
            let set = set.borrow();
            before_config.extend(set.before_config.iter().cloned());
            before_request.extend(set.before_request.iter().cloned());
            after_response.extend(set.after_response.iter().cloned());
        }

        trace!(
            before_config = before_config.len(),
            before_request = before_request.len(),
            after_response = after_response.len(),
            "merging caller hooks"
        );

        Self {
            before_config: chain_before_config(before_config),
            before_request: chain_before_request(before_request),
            after_response: chain_after_response(after_response),
        }
    }

    /// Runs the `before_config` slot, if any.
    pub async fn run_before_config(&self, context: &ConfigContext) -> Result<(), ApiError> {
        match &self.before_config {
            Some(hook) => hook(context).await,
            None => Ok(()),
        }
    }

    /// Runs the `before_request` slot, applying any replacement.
    pub async fn run_before_request(&self, config: &mut CallConfig) -> Result<(), ApiError> {
        if let Some(hook) = &self.before_request {
            let replacement = hook(&mut *config).await?;
            if let Some(replacement) = replacement {
                *config = replacement;
            }
        }
        Ok(())
    }

    /// Runs the `after_response` slot, applying any replacement.
    pub async fn run_after_response(
        &self,
        config: &CallConfig,
        response: &mut ApiResponse,
    ) -> Result<(), ApiError> {
        if let Some(hook) = &self.after_response {
            let replacement = hook(config, &mut *response).await?;
            if let Some(replacement) = replacement {
                *response = replacement;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for CallerHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallerHooks")
            .field("before_config", &self.has_before_config())
            .field("before_request", &self.has_before_request())
            .field("after_response", &self.has_after_response())
            .finish()
    }
}

fn before_config_hook<F>(hook: F) -> BeforeConfigHook
where
    F: for<'a> Fn(&'a ConfigContext) -> BoxFuture<'a, Result<(), ApiError>> + Send + Sync + 'static,
{
    Arc::new(hook)
}

fn before_request_hook<F>(hook: F) -> BeforeRequestHook
where
    F: for<'a> Fn(&'a mut CallConfig) -> BoxFuture<'a, Result<Option<CallConfig>, ApiError>>
        + Send
        + Sync
        + 'static,
{
    Arc::new(hook)
}

fn after_response_hook<F>(hook: F) -> AfterResponseHook
where
    F: for<'a> Fn(&'a CallConfig, &'a mut ApiResponse) -> BoxFuture<'a, Result<Option<ApiResponse>, ApiError>>
        + Send
        + Sync
        + 'static,
{
    Arc::new(hook)
}

fn chain_before_config(mut hooks: Vec<BeforeConfigHook>) -> Option<BeforeConfigHook> {
    if hooks.len() <= 1 {
        return hooks.pop();
    }
    let hooks: Arc<[BeforeConfigHook]> = hooks.into();
    Some(before_config_hook(move |context| {
        let hooks = Arc::clone(&hooks);
        Box::pin(async move {
            for hook in hooks.iter() {
                hook(context).await?;
            }
            Ok(())
        })
    }))
}

fn chain_before_request(mut hooks: Vec<BeforeRequestHook>) -> Option<BeforeRequestHook> {
    if hooks.len() <= 1 {
        return hooks.pop();
    }
    let hooks: Arc<[BeforeRequestHook]> = hooks.into();
    Some(before_request_hook(move |config| {
        let hooks = Arc::clone(&hooks);
        Box::pin(async move {
            for hook in hooks.iter() {
                let replacement = hook(&mut *config).await?;
                if let Some(replacement) = replacement {
                    *config = replacement;
                }
            }
            Ok(None)
        })
    }))
}

fn chain_after_response(mut hooks: Vec<AfterResponseHook>) -> Option<AfterResponseHook> {
    if hooks.len() <= 1 {
        return hooks.pop();
    }
    let hooks: Arc<[AfterResponseHook]> = hooks.into();
    Some(after_response_hook(move |config, response| {
        let hooks = Arc::clone(&hooks);
        Box::pin(async move {
            for hook in hooks.iter() {
                let replacement = hook(config, &mut *response).await?;
                if let Some(replacement) = replacement {
                    *response = replacement;
                }
            }
            Ok(None)
        })
    }))
}
