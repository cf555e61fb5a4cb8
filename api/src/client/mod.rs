//! Calling endpoints.
//!
//! [`ApiCaller`] drives one call from input to response: it builds the
//! call configuration, runs hooks, hands the request to a
//! [`RequestExecutor`] and maps failures. The executor is the only part that
//! talks to the network, and the crate does not ship one.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use api::client::{ApiCaller, RequestExecutor};
//! use api::call::{CallConfig, CallOptions, LogMode};
//! use api::{ApiError, ApiResponse};
//!
//! struct Http(reqwest::Client);
//!
//! impl RequestExecutor for Http {
//!     async fn execute(&self, config: &CallConfig) -> Result<ApiResponse, ApiError> {
//!         // issue the request with self.0
//!     }
//! }
//!
//! let caller = ApiCaller::builder(Http(reqwest::Client::new()))
//!     .base_url("https://api.example.com")?
//!     .default_header("Accept", "application/json")?
//!     .log(LogMode::Brief)
//!     .build();
//!
//! let user: User = caller
//!     .call(&get_user, Some(json!({ "id": 1 })), CallOptions::default())
//!     .await?;
//! ```

mod caller;
mod executor;

pub use caller::{ApiCaller, ApiCallerBuilder};
pub use executor::RequestExecutor;
