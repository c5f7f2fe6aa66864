//! Single-page transport abstraction

use super::client::RequestConfig;
use crate::error::Result;
use crate::pagination::Page;
use async_trait::async_trait;
use reqwest::Method;

/// Performs exactly one HTTP round trip and returns the decoded page.
///
/// Implementations must return [`Error::Api`](crate::Error::Api) for non-2xx
/// answers and a transport-kind error when no response was received. `url` is
/// either a path relative to the API base or an absolute URL, which must be
/// requested as-is (next-page links carry opaque cursors).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request
    async fn send(&self, method: Method, url: &str, config: RequestConfig) -> Result<Page>;
}
