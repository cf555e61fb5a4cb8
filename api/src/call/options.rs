//! Per-call options.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use strum::{Display, EnumString};

/// How much of a call is written to the log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum LogMode {
    /// Nothing beyond the tracing span.
    #[default]
    Off,
    /// Method and URL.
    Brief,
    /// Method, URL, request body and response data.
    Full,
}

/// Options passed alongside the input of a single call.
///
/// `headers` are added after the endpoint's own headers and win on
/// conflicts. `log` and `no_loader` fall back to caller and endpoint
/// defaults when unset. Everything in `extra` is carried untouched to
/// [`CallMeta::extra`](super::CallMeta::extra) for hooks and executors.
///
/// ## Examples
///
/// ```rust
/// use api::call::{CallOptions, LogMode};
///
/// let options = CallOptions::new()
///     .header("X-Request-Id", "42")
///     .log(LogMode::Brief)
///     .extra("retry", serde_json::json!(false));
/// assert_eq!(options.headers["X-Request-Id"], "42");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallOptions {
    pub headers: BTreeMap<String, String>,
    pub log: Option<LogMode>,
    pub no_loader: Option<bool>,
    pub extra: Map<String, Value>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn log(mut self, mode: LogMode) -> Self {
        self.log = Some(mode);
        self
    }

    pub fn no_loader(mut self, no_loader: bool) -> Self {
        self.no_loader = Some(no_loader);
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}
