//! Tests for the resource surface

use super::*;
use crate::auth::AuthConfig;
use crate::error::Error;
use crate::http::{ExecutorConfig, RequestOptions};
use crate::template::PathParams;
use crate::types::Method;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashSet;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    let config = ExecutorConfig::builder()
        .base_url(server.uri())
        .header("Accept", "application/json")
        .no_rate_limit()
        .build();
    ApiClient::with_executor_config(config, AuthConfig::token("secret123"))
}

// ============================================================================
// Endpoint Table Tests
// ============================================================================

#[test]
fn test_endpoint_lookup() {
    let ep = endpoint("list_keys").unwrap();
    assert_eq!(ep.method, Method::GET);
    assert_eq!(ep.path, "/projects/{project_id}/keys");
    assert!(ep.paginated);

    assert!(endpoint("list_widgets").is_none());
}

#[test]
fn test_endpoint_names_are_unique() {
    let names: HashSet<&str> = ENDPOINTS.iter().map(|e| e.name).collect();
    assert_eq!(names.len(), ENDPOINTS.len());
}

#[test]
fn test_collection_operations_are_paginated() {
    for ep in ENDPOINTS {
        let is_collection = ep.name.starts_with("list_") || ep.name.starts_with("search_");
        assert_eq!(
            ep.paginated, is_collection,
            "unexpected paginated flag for {}",
            ep.name
        );
    }
}

#[test]
fn test_mutating_operations_use_write_verbs() {
    for ep in ENDPOINTS {
        if ep.name.starts_with("create_") {
            assert_eq!(ep.method, Method::POST, "{} should POST", ep.name);
        }
        if ep.name.starts_with("delete_") {
            assert_eq!(ep.method, Method::DELETE, "{} should DELETE", ep.name);
        }
    }
}

// ============================================================================
// Dispatch Tests
// ============================================================================

#[tokio::test]
async fn test_call_unknown_operation() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let err = client
        .call("list_widgets", &PathParams::new(), RequestOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnknownEndpoint { ref name } if name == "list_widgets"));
}

#[tokio::test]
async fn test_call_missing_path_param() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let err = client
        .call("get_project", &PathParams::new(), RequestOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingPathParam { ref param } if param == "project_id"));
}

#[tokio::test]
async fn test_list_projects_sends_auth_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(header("Authorization", "token secret123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "p1"}])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let projects = client.list_projects().await.unwrap().unwrap();
    assert_eq!(projects, vec![json!({"id": "p1"})]);
}

#[tokio::test]
async fn test_get_project_renders_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p1", "name": "Demo"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let project = client.get_project("p1").await.unwrap().unwrap();
    assert_eq!(project["name"], "Demo");
}

// ============================================================================
// Project Scope Tests
// ============================================================================

#[tokio::test]
async fn test_scope_list_keys_hits_scoped_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/p1/keys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "k1"}])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let keys = client.project("p1").list_keys().await.unwrap().unwrap();
    assert_eq!(keys, vec![json!({"id": "k1"})]);
}

#[tokio::test]
async fn test_scope_create_key_posts_body() {
    let server = MockServer::start().await;
    let new_key = json!({"name": "greeting.hello"});

    Mock::given(method("POST"))
        .and(path("/projects/p1/keys"))
        .and(body_json(&new_key))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"id": "k1", "name": "greeting.hello"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created = client
        .project("p1")
        .create_key(new_key)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(created["id"], "k1");
}

#[tokio::test]
async fn test_scope_delete_key_204_yields_none() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/projects/p1/keys/k1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.project("p1").delete_key("k1").await.unwrap();
    assert_eq!(result, None);
}

#[tokio::test]
async fn test_scope_translations_for_key_renders_both_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/p1/keys/k1/translations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "t1"}])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let translations = client
        .project("p1")
        .translations_for_key("k1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(translations, vec![json!({"id": "t1"})]);
}

#[tokio::test]
async fn test_scope_search_keys_stream() {
    let server = MockServer::start().await;
    let query = json!({"q": "greeting"});

    Mock::given(method("POST"))
        .and(path("/projects/p1/keys/search"))
        .and(body_json(&query))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": "k1"}, {"id": "k2"}])),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let stream = client.project("p1").search_keys_stream(query).unwrap();
    let records: Vec<Value> = stream.map(|r| r.unwrap().data).collect().await;
    assert_eq!(records, vec![json!({"id": "k1"}), json!({"id": "k2"})]);
}

#[tokio::test]
async fn test_scope_update_translation_patches() {
    let server = MockServer::start().await;
    let patch = json!({"content": "Hallo"});

    Mock::given(method("PATCH"))
        .and(path("/projects/p1/translations/t1"))
        .and(body_json(&patch))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "t1", "content": "Hallo"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let updated = client
        .project("p1")
        .update_translation("t1", patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated["content"], "Hallo");
}
