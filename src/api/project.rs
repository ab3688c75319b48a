//! Project-scoped operations
//!
//! [`ProjectScope`] lists exactly the operations available once a project id
//! is fixed. The set is static and checkable at compile time; there is no
//! runtime method binding.

use super::client::ApiClient;
use crate::error::Result;
use crate::http::RequestOptions;
use crate::pagination::RecordStream;
use crate::template::{params, PathParams};
use serde_json::Value;

/// All operations available within one project
#[derive(Debug, Clone)]
pub struct ProjectScope {
    client: ApiClient,
    project_id: String,
}

impl ProjectScope {
    pub(crate) fn new(client: ApiClient, project_id: String) -> Self {
        Self { client, project_id }
    }

    /// The scoped project id
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    fn path_params(&self) -> PathParams {
        params("project_id", self.project_id.clone())
    }

    fn path_params_with(&self, key: &'static str, value: &str) -> PathParams {
        let mut map = self.path_params();
        map.insert(key, value.to_string());
        map
    }

    /// Fetch the project's own record
    pub async fn info(&self) -> Result<Option<Value>> {
        self.client.get_project(&self.project_id).await
    }

    // ========================================================================
    // Keys
    // ========================================================================

    /// List every translation key in the project
    pub async fn list_keys(&self) -> Result<Option<Vec<Value>>> {
        self.client
            .call_all("list_keys", &self.path_params(), RequestOptions::new())
            .await
    }

    /// Stream the project's translation keys
    pub fn list_keys_stream(&self) -> Result<RecordStream> {
        self.client
            .call_stream("list_keys", &self.path_params(), RequestOptions::new())
    }

    /// Create a translation key
    pub async fn create_key(&self, key: Value) -> Result<Option<Value>> {
        self.client
            .call(
                "create_key",
                &self.path_params(),
                RequestOptions::new().json(key),
            )
            .await
    }

    /// Delete a translation key
    pub async fn delete_key(&self, key_id: &str) -> Result<Option<Value>> {
        self.client
            .call(
                "delete_key",
                &self.path_params_with("key_id", key_id),
                RequestOptions::new(),
            )
            .await
    }

    /// Search keys matching a query body
    pub async fn search_keys(&self, query: Value) -> Result<Option<Vec<Value>>> {
        self.client
            .call_all(
                "search_keys",
                &self.path_params(),
                RequestOptions::new().json(query),
            )
            .await
    }

    /// Stream keys matching a query body
    pub fn search_keys_stream(&self, query: Value) -> Result<RecordStream> {
        self.client.call_stream(
            "search_keys",
            &self.path_params(),
            RequestOptions::new().json(query),
        )
    }

    // ========================================================================
    // Locales
    // ========================================================================

    /// List the project's locales
    pub async fn list_locales(&self) -> Result<Option<Vec<Value>>> {
        self.client
            .call_all("list_locales", &self.path_params(), RequestOptions::new())
            .await
    }

    // ========================================================================
    // Translations
    // ========================================================================

    /// List every translation in the project
    pub async fn list_translations(&self) -> Result<Option<Vec<Value>>> {
        self.client
            .call_all(
                "list_translations",
                &self.path_params(),
                RequestOptions::new(),
            )
            .await
    }

    /// Stream the project's translations
    pub fn list_translations_stream(&self) -> Result<RecordStream> {
        self.client.call_stream(
            "list_translations",
            &self.path_params(),
            RequestOptions::new(),
        )
    }

    /// List translations attached to one key
    pub async fn translations_for_key(&self, key_id: &str) -> Result<Option<Vec<Value>>> {
        self.client
            .call_all(
                "list_translations_for_key",
                &self.path_params_with("key_id", key_id),
                RequestOptions::new(),
            )
            .await
    }

    /// Create a translation
    pub async fn create_translation(&self, translation: Value) -> Result<Option<Value>> {
        self.client
            .call(
                "create_translation",
                &self.path_params(),
                RequestOptions::new().json(translation),
            )
            .await
    }

    /// Update a translation
    pub async fn update_translation(
        &self,
        translation_id: &str,
        patch: Value,
    ) -> Result<Option<Value>> {
        self.client
            .call(
                "update_translation",
                &self.path_params_with("translation_id", translation_id),
                RequestOptions::new().json(patch),
            )
            .await
    }

    /// Search translations matching a query body
    pub async fn search_translations(&self, query: Value) -> Result<Option<Vec<Value>>> {
        self.client
            .call_all(
                "search_translations",
                &self.path_params(),
                RequestOptions::new().json(query),
            )
            .await
    }

    /// Stream translations matching a query body
    pub fn search_translations_stream(&self, query: Value) -> Result<RecordStream> {
        self.client.call_stream(
            "search_translations",
            &self.path_params(),
            RequestOptions::new().json(query),
        )
    }
}
