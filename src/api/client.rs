//! The Lexio API client
//!
//! Thin resource layer over the retrieval engine: every operation is a row
//! in the endpoint table, dispatched either as a single request, a full
//! aggregation, or a record stream.

use super::endpoints::endpoint;
use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{ExecutorConfig, RequestExecutor, RequestOptions};
use crate::pagination::{fetch_all, RecordStream};
use crate::template::{render_path, PathParams};
use crate::types::Method;
use serde_json::Value;
use std::sync::Arc;

/// Default production API root
pub const DEFAULT_BASE_URL: &str = "https://api.lexio.app/v2";

/// Client for the Lexio localization API
#[derive(Debug, Clone)]
pub struct ApiClient {
    executor: Arc<RequestExecutor>,
}

impl ApiClient {
    /// Create a client for the production API with an access token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, access_token)
    }

    /// Create a client against a custom API root (e.g. a staging host)
    pub fn with_base_url(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        let config = ExecutorConfig::builder()
            .base_url(base_url)
            .header("Accept", "application/json")
            .build();
        Self::with_executor_config(config, AuthConfig::token(access_token))
    }

    /// Create a client with full control over executor config and auth
    pub fn with_executor_config(config: ExecutorConfig, auth: AuthConfig) -> Self {
        Self {
            executor: Arc::new(RequestExecutor::with_auth(config, auth)),
        }
    }

    /// The underlying request executor
    pub fn executor(&self) -> &Arc<RequestExecutor> {
        &self.executor
    }

    // ========================================================================
    // Raw traversal surface
    // ========================================================================

    /// Collect every page of a collection starting at `url` (path or
    /// absolute URL). `None` for a 204 first response.
    pub async fn fetch_all(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<Option<Vec<Value>>> {
        fetch_all(&self.executor, method, url, options).await
    }

    /// Open a record stream over a collection starting at `url`
    pub fn open_stream(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<RecordStream> {
        RecordStream::open(Arc::clone(&self.executor), method, url, options)
    }

    // ========================================================================
    // Table dispatch
    // ========================================================================

    /// Run a non-paginated operation from the endpoint table
    pub async fn call(
        &self,
        name: &str,
        params: &PathParams,
        options: RequestOptions,
    ) -> Result<Option<Value>> {
        let ep = endpoint(name).ok_or_else(|| Error::unknown_endpoint(name))?;
        let path = render_path(ep.path, params)?;
        self.executor.execute_json(ep.method, &path, options).await
    }

    /// Run a paginated operation from the endpoint table, collecting every
    /// page
    pub async fn call_all(
        &self,
        name: &str,
        params: &PathParams,
        options: RequestOptions,
    ) -> Result<Option<Vec<Value>>> {
        let ep = endpoint(name).ok_or_else(|| Error::unknown_endpoint(name))?;
        let path = render_path(ep.path, params)?;
        fetch_all(&self.executor, ep.method, &path, options).await
    }

    /// Open a record stream for a paginated operation from the endpoint table
    pub fn call_stream(
        &self,
        name: &str,
        params: &PathParams,
        options: RequestOptions,
    ) -> Result<RecordStream> {
        let ep = endpoint(name).ok_or_else(|| Error::unknown_endpoint(name))?;
        let path = render_path(ep.path, params)?;
        RecordStream::open(Arc::clone(&self.executor), ep.method, &path, options)
    }

    // ========================================================================
    // Resource operations
    // ========================================================================

    /// List all projects
    pub async fn list_projects(&self) -> Result<Option<Vec<Value>>> {
        self.call_all("list_projects", &PathParams::new(), RequestOptions::new())
            .await
    }

    /// Fetch a single project
    pub async fn get_project(&self, project_id: &str) -> Result<Option<Value>> {
        self.call(
            "get_project",
            &crate::template::params("project_id", project_id),
            RequestOptions::new(),
        )
        .await
    }

    /// Scope key/locale/translation operations to one project
    pub fn project(&self, project_id: impl Into<String>) -> super::project::ProjectScope {
        super::project::ProjectScope::new(self.clone(), project_id.into())
    }
}
