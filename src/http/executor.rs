//! Request execution with retry and backoff
//!
//! The executor issues one logical HTTP exchange at a time. Transient
//! failures (connect errors, timeouts, 429, 5xx) are retried with
//! configurable backoff; the caller only ever observes the final success or
//! the final failure. Terminal statuses (4xx other than 429) surface
//! immediately without a retry.

use super::rate_limit::{RateLimitInfo, RateLimiter, RateLimiterConfig};
use crate::auth::{AuthConfig, Authenticator};
use crate::error::{is_retryable_status, Error, Result};
use crate::pagination::LinkSet;
use crate::types::{BackoffType, Method};
use bytes::Bytes;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Configuration for the request executor
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Base URL joined onto relative request paths
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries for transient failures
    pub max_retries: u32,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// Client-side rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(60),
            backoff_type: BackoffType::Exponential,
            rate_limit: Some(RateLimiterConfig::default()),
            default_headers: HashMap::new(),
            user_agent: format!("lexio-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ExecutorConfig {
    /// Create a new config builder
    pub fn builder() -> ExecutorConfigBuilder {
        ExecutorConfigBuilder::default()
    }
}

/// Builder for executor config
#[derive(Default)]
pub struct ExecutorConfigBuilder {
    config: ExecutorConfig,
}

impl ExecutorConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable client-side rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ExecutorConfig {
        self.config
    }
}

/// Options for a single request
///
/// For paginated traversals these stay fixed across every page; only the
/// target URL changes between requests.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Query parameters
    pub query: HashMap<String, String>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// JSON request body, serialized with `Content-Type: application/json`
    pub body: Option<Value>,
    /// Override max retries for this request
    pub max_retries: Option<u32>,
}

impl RequestOptions {
    /// Create empty request options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Override max retries
    #[must_use]
    pub fn retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }
}

/// Decoded response body
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// The server answered 204; there is no body to decode
    NoContent,
    /// A parsed JSON body
    Json(Value),
}

/// One HTTP response: status, headers and raw body
///
/// Created per request and discarded after decoding; never persisted.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub body: Bytes,
    /// The URL the response came from (for error context)
    pub url: String,
}

impl ResponseEnvelope {
    /// Decode the body according to status and content type.
    ///
    /// A 204 decodes to [`Decoded::NoContent`]. Any other status must carry
    /// an `application/json` content type (parameters such as `charset` are
    /// allowed) or the call fails with [`Error::UnexpectedContentType`];
    /// a JSON parse failure yields [`Error::MalformedResponse`].
    pub fn decode(&self) -> Result<Decoded> {
        if self.status == StatusCode::NO_CONTENT {
            return Ok(Decoded::NoContent);
        }

        let content_type = self
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !content_type.trim_start().starts_with("application/json") {
            return Err(Error::unexpected_content_type(&self.url, content_type));
        }

        serde_json::from_slice(&self.body)
            .map(Decoded::Json)
            .map_err(|e| Error::malformed_response(&self.url, e.to_string()))
    }

    /// Decode to an optional JSON value (`None` for 204)
    pub fn into_json(self) -> Result<Option<Value>> {
        match self.decode()? {
            Decoded::NoContent => Ok(None),
            Decoded::Json(value) => Ok(Some(value)),
        }
    }

    /// Parse the pagination links carried in the `Link` header
    pub fn links(&self) -> LinkSet {
        LinkSet::from_headers(&self.headers)
    }

    /// Snapshot of the server's rate-limit headers
    pub fn rate_limit(&self) -> RateLimitInfo {
        RateLimitInfo::from_headers(&self.headers)
    }
}

/// HTTP request executor with retry, backoff and rate limiting
pub struct RequestExecutor {
    client: Client,
    config: ExecutorConfig,
    authenticator: Authenticator,
    rate_limiter: Option<RateLimiter>,
}

impl RequestExecutor {
    /// Create an executor with default configuration
    pub fn new() -> Self {
        Self::with_config(ExecutorConfig::default())
    }

    /// Create an executor with custom configuration
    pub fn with_config(config: ExecutorConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Self {
            client,
            config,
            authenticator: Authenticator::default(),
            rate_limiter,
        }
    }

    /// Create an executor with authentication
    pub fn with_auth(config: ExecutorConfig, auth: AuthConfig) -> Self {
        let mut executor = Self::with_config(config);
        executor.authenticator = Authenticator::new(auth);
        executor
    }

    /// Resolve a path against the configured base URL.
    ///
    /// Absolute URLs pass through untouched; relative paths join onto the
    /// base URL.
    pub fn resolve(&self, path: &str) -> Result<Url> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(Url::parse(path)?);
        }

        match &self.config.base_url {
            Some(base) => {
                let joined = format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    path.trim_start_matches('/')
                );
                Ok(Url::parse(&joined)?)
            }
            None => Ok(Url::parse(path)?),
        }
    }

    /// Execute one logical request, retrying transient failures.
    ///
    /// Returns the final [`ResponseEnvelope`] on success. Fails with a
    /// transport error once retries are exhausted, or with
    /// [`Error::HttpStatus`] for a terminal status (4xx other than 429).
    pub async fn execute(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<ResponseEnvelope> {
        let url = self.resolve(url)?;
        let max_retries = options.max_retries.unwrap_or(self.config.max_retries);

        let mut last_error = None;
        let mut attempt = 0;

        while attempt <= max_retries {
            if let Some(ref limiter) = self.rate_limiter {
                limiter.wait().await;
            }

            let req = self.build_request(method, &url, &options);

            match req.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = extract_retry_after(&response);
                        if attempt < max_retries {
                            warn!(
                                url = %url,
                                attempt = attempt + 1,
                                retry_after_seconds = retry_after,
                                "rate limited (429), backing off"
                            );
                            tokio::time::sleep(Duration::from_secs(retry_after)).await;
                            attempt += 1;
                            continue;
                        }
                        return Err(Error::RateLimited {
                            retry_after_seconds: retry_after,
                        });
                    }

                    if is_retryable_status(status.as_u16()) && attempt < max_retries {
                        let delay = self.calculate_backoff(attempt);
                        warn!(
                            url = %url,
                            status = status.as_u16(),
                            attempt = attempt + 1,
                            delay_ms = delay.as_millis() as u64,
                            "transient server error, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        last_error = Some(Error::http_status(status.as_u16(), String::new()));
                        continue;
                    }

                    if status.as_u16() >= 400 {
                        let body = response.text().await.unwrap_or_default();
                        return Err(Error::http_status(status.as_u16(), body));
                    }

                    let info = RateLimitInfo::from_headers(response.headers());
                    if info.is_exhausted() {
                        debug!(url = %url, "server reports rate-limit quota exhausted");
                    }

                    let headers = response.headers().clone();
                    let body = response.bytes().await.map_err(Error::Http)?;

                    debug!(%method, url = %url, status = status.as_u16(), "request succeeded");
                    return Ok(ResponseEnvelope {
                        status,
                        headers,
                        body,
                        url: url.to_string(),
                    });
                }
                Err(e) => {
                    let timed_out = e.is_timeout();
                    if (timed_out || e.is_connect()) && attempt < max_retries {
                        let delay = self.calculate_backoff(attempt);
                        warn!(
                            url = %url,
                            attempt = attempt + 1,
                            delay_ms = delay.as_millis() as u64,
                            error = %e,
                            "transport error, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        last_error = Some(if timed_out {
                            Error::Timeout {
                                timeout_ms: self.config.timeout.as_millis() as u64,
                            }
                        } else {
                            Error::Http(e)
                        });
                        continue;
                    }

                    if timed_out {
                        return Err(Error::Timeout {
                            timeout_ms: self.config.timeout.as_millis() as u64,
                        });
                    }
                    return Err(Error::Http(e));
                }
            }
        }

        Err(last_error.unwrap_or(Error::MaxRetriesExceeded { max_retries }))
    }

    /// Execute and decode in one step
    pub async fn execute_json(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<Option<Value>> {
        self.execute(method, url, options).await?.into_json()
    }

    fn build_request(
        &self,
        method: Method,
        url: &Url,
        options: &RequestOptions,
    ) -> reqwest::RequestBuilder {
        let mut req = self.client.request(method.into(), url.clone());

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        for (key, value) in &options.headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if !options.query.is_empty() {
            req = req.query(&options.query);
        }
        if let Some(ref body) = options.body {
            req = req.json(body);
        }

        self.authenticator.apply(req)
    }

    /// Calculate backoff delay for a given attempt
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let delay = match self.config.backoff_type {
            BackoffType::Constant => self.config.initial_backoff,
            BackoffType::Linear => self.config.initial_backoff * (attempt + 1),
            BackoffType::Exponential => {
                self.config.initial_backoff * 2u32.saturating_pow(attempt)
            }
        };

        std::cmp::min(delay, self.config.max_backoff)
    }
}

impl Default for RequestExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Extract the retry-after header value in seconds
fn extract_retry_after(response: &Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
        .unwrap_or(60)
}
