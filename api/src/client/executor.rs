//! The request executor seam.

use std::future::Future;
use std::sync::Arc;

use crate::call::CallConfig;
use crate::error::ApiError;
use crate::response::ApiResponse;

/// Issues requests described by a [`CallConfig`].
///
/// Implementations own the transport: connection pooling, timeouts,
/// serializing [`RequestBody`](crate::call::RequestBody) and parsing the
/// response body into [`ApiResponse::data`]. Transport failures should be
/// reported as [`ClientError`](crate::error::ClientError).
///
/// Non-success statuses are returned as responses, not errors;
/// [`ApiCaller`](super::ApiCaller) turns them into
/// [`ClientError::HttpStatus`](crate::error::ClientError::HttpStatus) after
/// `after_response` hooks had a chance to see them.
pub trait RequestExecutor: Send + Sync {
    fn execute(
        &self,
        config: &CallConfig,
    ) -> impl Future<Output = Result<ApiResponse, ApiError>> + Send;
}

impl<E: RequestExecutor> RequestExecutor for Arc<E> {
    fn execute(
        &self,
        config: &CallConfig,
    ) -> impl Future<Output = Result<ApiResponse, ApiError>> + Send {
        (**self).execute(config)
    }
}
