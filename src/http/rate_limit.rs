//! Client-side rate limiting and server rate-limit header introspection
//!
//! The token bucket (governor) throttles outgoing requests; [`RateLimitInfo`]
//! is a read-only snapshot of the `X-Rate-Limit-*` headers the Lexio API
//! returns on every response.

use chrono::{DateTime, TimeZone, Utc};
use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use reqwest::header::HeaderMap;
use std::num::NonZeroU32;
use std::sync::Arc;

/// Configuration for client-side rate limiting
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Maximum number of requests per second
    pub requests_per_second: u32,
    /// Burst size (max tokens in bucket)
    pub burst_size: u32,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 10,
            burst_size: 10,
        }
    }
}

impl RateLimiterConfig {
    /// Create a new rate limiter config
    pub fn new(requests_per_second: u32, burst_size: u32) -> Self {
        Self {
            requests_per_second,
            burst_size,
        }
    }
}

/// Token bucket rate limiter for outgoing requests
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given config
    pub fn new(config: &RateLimiterConfig) -> Self {
        let one = NonZeroU32::MIN;
        let quota = Quota::per_second(NonZeroU32::new(config.requests_per_second).unwrap_or(one))
            .allow_burst(NonZeroU32::new(config.burst_size).unwrap_or(one));

        Self {
            limiter: Arc::new(Governor::direct(quota)),
        }
    }

    /// Wait until a request can be made
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }

    /// Try to acquire a permit without waiting
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish()
    }
}

/// Snapshot of the server's rate-limit headers on one response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Request quota for the current window (`X-Rate-Limit-Limit`)
    pub limit: Option<u32>,
    /// Requests remaining in the current window (`X-Rate-Limit-Remaining`)
    pub remaining: Option<u32>,
    /// When the window resets (`X-Rate-Limit-Reset`, unix seconds)
    pub reset: Option<DateTime<Utc>>,
}

impl RateLimitInfo {
    /// Parse rate-limit headers from a response
    ///
    /// Missing or malformed headers degrade to `None` for that field.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            limit: parse_numeric_header(headers, "x-rate-limit-limit"),
            remaining: parse_numeric_header(headers, "x-rate-limit-remaining"),
            reset: parse_numeric_header(headers, "x-rate-limit-reset")
                .and_then(|secs: i64| Utc.timestamp_opt(secs, 0).single()),
        }
    }

    /// True when the server reports the quota as exhausted
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}

fn parse_numeric_header<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod rate_limit_tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_rate_limiter_config_default() {
        let config = RateLimiterConfig::default();
        assert_eq!(config.requests_per_second, 10);
        assert_eq!(config.burst_size, 10);
    }

    #[test]
    fn test_rate_limiter_allows_burst() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(10, 5));

        for _ in 0..5 {
            assert!(limiter.try_acquire());
        }
    }

    #[tokio::test]
    async fn test_rate_limiter_wait_within_burst() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(100, 10));
        limiter.wait().await;
    }

    #[test]
    fn test_rate_limit_info_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-rate-limit-limit", HeaderValue::from_static("1000"));
        headers.insert("x-rate-limit-remaining", HeaderValue::from_static("999"));
        headers.insert("x-rate-limit-reset", HeaderValue::from_static("1500000000"));

        let info = RateLimitInfo::from_headers(&headers);
        assert_eq!(info.limit, Some(1000));
        assert_eq!(info.remaining, Some(999));
        assert_eq!(
            info.reset,
            Utc.timestamp_opt(1_500_000_000, 0).single()
        );
        assert!(!info.is_exhausted());
    }

    #[test]
    fn test_rate_limit_info_missing_headers() {
        let info = RateLimitInfo::from_headers(&HeaderMap::new());
        assert_eq!(info, RateLimitInfo::default());
    }

    #[test]
    fn test_rate_limit_info_malformed_field_degrades() {
        let mut headers = HeaderMap::new();
        headers.insert("x-rate-limit-limit", HeaderValue::from_static("plenty"));
        headers.insert("x-rate-limit-remaining", HeaderValue::from_static("0"));

        let info = RateLimitInfo::from_headers(&headers);
        assert_eq!(info.limit, None);
        assert!(info.is_exhausted());
    }
}
