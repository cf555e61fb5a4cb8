//! Typed path templates, endpoint definitions and API call configuration.
//!
//! The `api` crate describes REST endpoints and turns a call's input into a
//! request descriptor, leaving the actual I/O to a pluggable executor.
//!
//! ## Features
//!
//! - **Path templates**: `users/:id/posts/:page?` with optional segments,
//!   positional or named inputs, and `:name` / `{name}` template rendering
//! - **Composable paths**: combine fixed text and builders with [`path!`]
//! - **Endpoint extensions**: content type, form encoding, validation,
//!   per-endpoint hooks and headers
//! - **Input routing**: one input object is split into path arguments,
//!   query string and request body
//! - **Hooks**: `before_config`, `before_request` and `after_response`,
//!   chained in order
//! - **Layered error handling**: structured errors for different failure modes
//!
//! ## Example
//!
//! ```rust,ignore
//! use api::{build_api, ApiCaller, ApiDefinition, Endpoint};
//! use api::call::CallOptions;
//! use api::path::PathBuilder;
//! use serde_json::json;
//!
//! let definition = ApiDefinition::new().group(
//!     "users",
//!     ApiDefinition::new()
//!         .endpoint("get", Endpoint::builder().get(PathBuilder::parse("users/:id")?).build())
//!         .endpoint("create", Endpoint::builder().post(PathBuilder::fixed("users")).build()),
//! );
//!
//! let api = build_api(definition, ApiCaller::new(executor))?;
//! let user: User = api
//!     .call("users.get", Some(json!({ "id": 1 })), CallOptions::default())
//!     .await?;
//! ```

pub mod call;
pub mod client;
pub mod definition;
pub mod endpoint;
pub mod endpoint_name;
pub mod error;
pub mod hooks;
pub mod method;
pub mod path;
pub mod response;

// Re-exports for convenience
pub use call::{
    CallConfig, CallInputs, CallOptions, LogMode, PathsConfig, RequestBody, assemble_config,
    create_config, split_input,
};
pub use client::{ApiCaller, ApiCallerBuilder, RequestExecutor};
pub use definition::{Api, ApiDefinition, ApiNode, build_api};
pub use endpoint::{Endpoint, EndpointBuilder};
pub use endpoint_name::{EndpointName, EndpointNameError};
pub use error::{ApiError, ClientError, ConfigError, PathError, ValidationError};
pub use hooks::{CallerHooks, ConfigContext};
pub use method::RestMethod;
pub use path::{PathBuilder, PathInputs, PathValue};
pub use response::ApiResponse;
