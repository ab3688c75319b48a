//! HTTP request execution
//!
//! The request executor owns all transport concerns: retry with backoff on
//! transient failures, client-side rate limiting, response classification and
//! JSON body decoding. Everything above it (aggregation, streaming, the
//! resource surface) treats a request as a single suspension point that
//! either yields a [`ResponseEnvelope`] or a final error.

mod executor;
mod rate_limit;

pub use executor::{
    Decoded, ExecutorConfig, ExecutorConfigBuilder, RequestExecutor, RequestOptions,
    ResponseEnvelope,
};
pub use rate_limit::{RateLimitInfo, RateLimiter, RateLimiterConfig};
