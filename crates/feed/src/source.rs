use std::future::Future;
use std::pin::Pin;

use airwatch_protocol::ApiResponse;

use crate::error::FeedError;

/// Anything that can produce one telemetry response on demand.
///
/// [`Client`](crate::Client) implements this over HTTP; tests substitute
/// scripted sources.
pub trait TelemetrySource: Send + Sync + 'static {
    fn fetch(&self) -> Pin<Box<dyn Future<Output = Result<ApiResponse, FeedError>> + Send + '_>>;
}
