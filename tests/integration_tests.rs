//! End-to-end tests against a mock HTTP server
//!
//! Exercises the public surface: authenticated client, multi-page
//! aggregation, streamed traversal with progress, and error propagation.

use futures::StreamExt;
use lexio_client::{
    ApiClient, AuthConfig, BackoffType, Error, ExecutorConfig, Method, RecordEnvelope,
    RequestOptions,
};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    let config = ExecutorConfig::builder()
        .base_url(server.uri())
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_millis(100),
        )
        .no_rate_limit()
        .build();
    ApiClient::with_executor_config(config, AuthConfig::token("integration-token"))
}

fn page(records: Value, link: Option<String>) -> ResponseTemplate {
    let mut template = ResponseTemplate::new(200).set_body_json(records);
    if let Some(link) = link {
        template = template.insert_header("link", link.as_str());
    }
    template
}

#[tokio::test]
async fn test_paginated_listing_merges_all_pages() {
    let server = MockServer::start().await;
    let uri = server.uri();

    Mock::given(method("GET"))
        .and(path("/projects/p1/keys"))
        .and(query_param("page", "2"))
        .and(header("Authorization", "token integration-token"))
        .respond_with(page(json!([{"id": "k3"}]), None))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/projects/p1/keys"))
        .and(header("Authorization", "token integration-token"))
        .respond_with(page(
            json!([{"id": "k1"}, {"id": "k2"}]),
            Some(format!("<{uri}/projects/p1/keys?page=2>; rel=\"next\"")),
        ))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let keys = client.project("p1").list_keys().await.unwrap().unwrap();

    assert_eq!(
        keys,
        vec![json!({"id": "k1"}), json!({"id": "k2"}), json!({"id": "k3"})]
    );
}

#[tokio::test]
async fn test_streamed_listing_reports_progress() {
    let server = MockServer::start().await;
    let uri = server.uri();

    Mock::given(method("GET"))
        .and(path("/projects/p1/translations"))
        .and(query_param("page", "2"))
        .respond_with(page(json!([{"id": "t3"}, {"id": "t4"}]), None))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/projects/p1/translations"))
        .respond_with(page(
            json!([{"id": "t1"}, {"id": "t2"}]),
            Some(format!(
                "<{uri}/projects/p1/translations?page=2&per_page=2>; rel=\"next\", \
                 <{uri}/projects/p1/translations?page=2&per_page=2>; rel=\"last\""
            )),
        ))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let stream = client.project("p1").list_translations_stream().unwrap();
    let envelopes: Vec<RecordEnvelope> = stream.map(|r| r.unwrap()).collect().await;

    assert_eq!(envelopes.len(), 4);
    let currents: Vec<u64> = envelopes.iter().map(|e| e.progress.current).collect();
    assert_eq!(currents, vec![1, 2, 3, 4]);
    assert!(envelopes.iter().all(|e| e.progress.total == Some(4)));
}

#[tokio::test]
async fn test_transient_failure_recovered_before_caller_sees_it() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(page(json!([{"id": "p1"}]), None))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let projects = client.list_projects().await.unwrap().unwrap();
    assert_eq!(projects, vec![json!({"id": "p1"})]);
}

#[tokio::test]
async fn test_terminal_error_propagates_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such project"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get_project("nope").await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
}

#[tokio::test]
async fn test_raw_traversal_surface() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/p1/locales"))
        .respond_with(page(json!([{"code": "de"}, {"code": "en"}]), None))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let locales = client
        .fetch_all(Method::GET, "/projects/p1/locales", RequestOptions::new())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(locales.len(), 2);

    let stream = client
        .open_stream(Method::GET, "/projects/p1/locales", RequestOptions::new())
        .unwrap();
    let streamed: Vec<Value> = stream.map(|r| r.unwrap().data).collect().await;
    assert_eq!(streamed, locales);
}

#[tokio::test]
async fn test_no_content_collection_is_null_and_exhausted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/p1/keys"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let keys = client.project("p1").list_keys().await.unwrap();
    assert!(keys.is_none());

    let mut stream = client.project("p1").list_keys_stream().unwrap();
    assert!(stream.next().await.is_none());
}
