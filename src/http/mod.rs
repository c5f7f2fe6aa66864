//! HTTP module
//!
//! The authenticated channel to the Canvas API.
//!
//! # Features
//!
//! - **Bearer Auth**: The API token is attached to every request
//! - **Error Normalization**: Non-2xx answers become [`Error::Api`](crate::Error::Api),
//!   unreachable hosts stay raw transport errors
//! - **Retries**: Idempotent GETs retry on 429/5xx with backoff; mutations never do
//! - **Rate Limiting**: Token bucket rate limiter using governor
//!
//! [`Transport`] is the seam the Canvas client talks through, so tests can
//! substitute a recording fake for the real [`HttpClient`].

mod client;
mod rate_limit;
mod transport;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use transport::Transport;

#[cfg(test)]
mod tests;
