//! Integration tests for the HTTP API client.
//!
//! These tests run [`HttpApiClient`] against a local mock server and verify
//! request encoding, response parsing, and error handling. The client is
//! blocking, so every call runs inside `spawn_blocking`.

use std::sync::Arc;

use rest_model::clients::ApiClient;
use rest_model::{
    ApiConfig, ApiError, BaseUrl, HttpApiClient, ModelError, ModelType, Params, RequestPath,
};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn params(value: Value) -> Params {
    value.as_object().cloned().unwrap()
}

/// Builds a client for the mock server. Must run on a blocking thread.
fn create_client(uri: &str) -> HttpApiClient {
    let config = ApiConfig::builder()
        .base_url(BaseUrl::new(uri).unwrap())
        .user_agent_prefix("TestApp/1.0")
        .header("Authorization", "Bearer test-token")
        .build()
        .unwrap();
    HttpApiClient::new(&config).unwrap()
}

// ============================================================================
// Request Encoding
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_get_sends_params_as_query_string() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "2"))
        .and(query_param("ids", "1,2"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let envelope = tokio::task::spawn_blocking(move || {
        create_client(&uri).request(params(json!({
            "_method": "get",
            "_path": "users",
            "page": 2,
            "ids": [1, 2],
            "skipped": null
        })))
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(envelope.data, json!([{"id": 1}]));
    assert_eq!(envelope.errors, json!({}));
    assert_eq!(envelope.metadata, json!([]));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_post_sends_params_as_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_json(json!({"name": "Lindsay"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 5, "name": "Lindsay"})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let envelope = tokio::task::spawn_blocking(move || {
        create_client(&uri).request(params(json!({
            "_method": "post",
            "_path": "users",
            "name": "Lindsay"
        })))
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(envelope.data, json!({"id": 5, "name": "Lindsay"}));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_user_agent_carries_prefix() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/users/1"))
        .and(header(
            "User-Agent",
            format!("TestApp/1.0 | rest-model v{}", rest_model::clients::CRATE_VERSION).as_str(),
        ))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let envelope = tokio::task::spawn_blocking(move || {
        create_client(&uri).request(params(json!({"_method": "delete", "_path": "users/1"})))
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(envelope.data, json!({}));
}

// ============================================================================
// Response Parsing
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_errors_and_metadata_are_lifted_from_object_body() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "id": 1,
            "errors": {"name": ["can't be blank"]},
            "metadata": {"request_id": "abc"}
        })))
        .mount(&server)
        .await;

    let uri = server.uri();
    let envelope = tokio::task::spawn_blocking(move || {
        create_client(&uri).request(params(json!({"_method": "put", "_path": "users/1", "name": ""})))
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(envelope.data, json!({"id": 1}));
    assert_eq!(envelope.errors, json!({"name": ["can't be blank"]}));
    assert_eq!(envelope.metadata, json!({"request_id": "abc"}));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_is_response_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        create_client(&uri).request(params(json!({"_method": "get", "_path": "users"})))
    })
    .await
    .unwrap();

    match result {
        Err(ApiError::Response(error)) => {
            assert_eq!(error.code, 503);
            assert_eq!(error.message, "unavailable");
            assert_eq!(error.path, "users");
        }
        other => panic!("expected response error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_json_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        create_client(&uri).request(params(json!({"_method": "get", "_path": "users"})))
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(ApiError::Parse(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_not_found_with_empty_body_is_response_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let users = ModelType::builder("User")
            .api_client(Arc::new(create_client(&uri)))
            .build();
        users.get_resource("users/999", Params::new())
    })
    .await
    .unwrap();

    match result {
        Err(ModelError::Transport(ApiError::Response(error))) => {
            assert_eq!(error.code, 404);
            assert_eq!(error.path, "users/999");
        }
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_not_found_with_html_body_keeps_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/999"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>Not Found</html>"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        create_client(&uri).request(params(json!({"_method": "get", "_path": "users/999"})))
    })
    .await
    .unwrap();

    match result {
        Err(ApiError::Response(error)) => {
            assert_eq!(error.code, 404);
            assert_eq!(error.message, "<html>Not Found</html>");
        }
        other => panic!("expected response error, got {other:?}"),
    }
}

// ============================================================================
// Literal Paths
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_literal_path_with_query_string() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("active", "true"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let envelope = tokio::task::spawn_blocking(move || {
        create_client(&uri).request(params(json!({
            "_method": "get",
            "_path": "users?active=true",
            "page": 2
        })))
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(envelope.data, json!([{"id": 1}]));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_encoded_literal_path_is_not_encoded_twice() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tags/a%20b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "a b"})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let envelope = tokio::task::spawn_blocking(move || {
        create_client(&uri).request(params(json!({"_method": "get", "_path": "tags/a%20b"})))
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(envelope.data, json!({"name": "a b"}));
}

// ============================================================================
// Model Types Over HTTP
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_model_type_custom_method_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/7/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Popular users",
            "metadata": {"total": 2}
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/popular"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Lindsay"},
            {"id": 2, "name": "Sam"}
        ])))
        .mount(&server)
        .await;

    let uri = server.uri();
    let (collection, resource) = tokio::task::spawn_blocking(move || {
        let client = Arc::new(create_client(&uri));
        let base = ModelType::builder("Base").api_client(client).build();
        let users = ModelType::builder("User")
            .collection_path("users")
            .parent(&base)
            .build();
        users.custom_get(["popular"]);

        let collection = users.call("popular", Some(params(json!({"limit": 2}))));
        let resource = users.get_resource(RequestPath::symbol("popular"), params(json!({"id": 7})));
        (collection, resource)
    })
    .await
    .unwrap();

    let collection = collection.unwrap().into_collection().unwrap();
    assert_eq!(collection.len(), 2);
    assert_eq!(collection[1].get("name"), Some(&json!("Sam")));

    let resource = resource.unwrap();
    assert_eq!(resource.get("title"), Some(&json!("Popular users")));
    assert_eq!(resource.errors(), Some(&json!({})));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_model_type_surfaces_transport_errors() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let client = Arc::new(create_client(&uri));
        let users = ModelType::builder("User").api_client(client).build();
        users.patch_resource("users/1", params(json!({"name": "x"})))
    })
    .await
    .unwrap();

    assert!(matches!(
        result,
        Err(ModelError::Transport(ApiError::Response(_)))
    ));
}
