//! HTTP client module
//!
//! Provides the HTTP client used to talk to the wiki API.
//!
//! # Features
//!
//! - **Timeouts**: One timeout covering the request and its body
//! - **Retries**: Opt-in retry logic with backoff, driven by `Error::is_retryable`
//! - **Rate Limiting**: Optional token bucket rate limiter using governor
//! - **Backoff Strategies**: Constant, linear, and exponential backoff

mod client;
mod rate_limit;

pub use client::{default_user_agent, HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
