//! Tests for the HTTP client module

use super::*;
use crate::error::{Error, ErrorKind};
use crate::types::BackoffType;
use reqwest::{Method, StatusCode};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(base_url)
        .bearer_token("test-token")
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_secs(1),
        )
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 3);
    assert!(config.base_url.is_none());
    assert!(config.bearer_token.is_none());
    assert!(config.rate_limit.is_some());
}

#[test]
fn test_http_client_config_debug_redacts_token() {
    let config = HttpClientConfig::builder().bearer_token("s3cret").build();
    let debug = format!("{config:?}");
    assert!(!debug.contains("s3cret"));
    assert!(debug.contains("<redacted>"));
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("type", "announcement")
        .query_list("include", ["total_students", "teachers"])
        .json(json!({"key": "value"}))
        .retries(2);

    assert_eq!(
        config.query,
        vec![
            ("type".to_string(), "announcement".to_string()),
            ("include[]".to_string(), "total_students".to_string()),
            ("include[]".to_string(), "teachers".to_string()),
        ]
    );
    assert_eq!(config.query_value("include[]"), Some("total_students"));
    assert_eq!(config.query_value("missing"), None);
    assert!(config.body.is_some());
    assert_eq!(config.max_retries, Some(2));
}

#[test]
fn test_calculate_backoff() {
    let config = HttpClientConfig::builder()
        .backoff(
            BackoffType::Exponential,
            Duration::from_millis(100),
            Duration::from_millis(500),
        )
        .build();
    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(1), Duration::from_millis(200));
    assert_eq!(client.calculate_backoff(2), Duration::from_millis(400));
    assert_eq!(client.calculate_backoff(3), Duration::from_millis(500));
}

#[tokio::test]
async fn test_send_attaches_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&format!("{}/api/v1", mock_server.uri()));
    let page = client
        .send(Method::GET, "/courses", RequestConfig::new())
        .await
        .unwrap();

    assert_eq!(page.body, json!([{"id": 1}]));
    assert!(page.next.is_none());
}

#[tokio::test]
async fn test_send_picks_up_next_link() {
    let mock_server = MockServer::start().await;
    let next = format!("{}/api/v1/courses?page=2&per_page=10", mock_server.uri());
    let link = format!(
        r#"<{}/api/v1/courses?page=1>; rel="current", <{next}>; rel="next", <{}/api/v1/courses?page=1>; rel="first""#,
        mock_server.uri(),
        mock_server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/api/v1/courses"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", link.as_str())
                .set_body_json(json!([{"id": 1}])),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&format!("{}/api/v1", mock_server.uri()));
    let page = client
        .send(Method::GET, "courses", RequestConfig::new())
        .await
        .unwrap();

    assert_eq!(page.next.as_deref(), Some(next.as_str()));
}

#[tokio::test]
async fn test_send_passes_query_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/courses"))
        .and(query_param("include[]", "teachers"))
        .and(body_json(json!({"course": {"name": "Rust"}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 7, "name": "Rust"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&format!("{}/api/v1", mock_server.uri()));
    let page = client
        .send(
            Method::POST,
            "/courses",
            RequestConfig::new()
                .query_list("include", ["teachers"])
                .json(json!({"course": {"name": "Rust"}})),
        )
        .await
        .unwrap();

    assert_eq!(page.body["id"], 7);
}

#[tokio::test]
async fn test_send_empty_body_is_null() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/courses/3"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = test_client(&format!("{}/api/v1", mock_server.uri()));
    let page = client
        .send(Method::DELETE, "/courses/3", RequestConfig::new())
        .await
        .unwrap();

    assert!(page.body.is_null());
}

#[tokio::test]
async fn test_non_2xx_becomes_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&format!("{}/api/v1", mock_server.uri()));
    let err = client
        .send(Method::GET, "/courses/404", RequestConfig::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RemoteApi);
    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("not found"));
}

#[tokio::test]
async fn test_non_json_error_body_is_kept_raw() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/self/profile"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let client = test_client(&format!("{}/api/v1", mock_server.uri()));
    let err = client
        .send(Method::GET, "/users/self/profile", RequestConfig::new())
        .await
        .unwrap_err();

    match err {
        Error::Api {
            status,
            message,
            body,
        } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Unauthorized");
            assert!(body.is_none());
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_retries_on_503() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = test_client(&format!("{}/api/v1", mock_server.uri()));
    let page = client
        .send(Method::GET, "/courses", RequestConfig::new())
        .await
        .unwrap();

    assert_eq!(page.body, json!([]));
}

#[tokio::test]
async fn test_mutations_are_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/courses"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"message": "busy"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&format!("{}/api/v1", mock_server.uri()));
    let err = client
        .send(
            Method::POST,
            "/courses",
            RequestConfig::new().json(json!({"course": {"name": "x"}})),
        )
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
}

#[test]
fn test_api_error_unreadable_body() {
    let err = super::client::api_error(
        StatusCode::BAD_GATEWAY,
        Err::<String, _>("connection reset"),
    );

    assert_eq!(err.status(), Some(502));
    assert_eq!(
        err.to_string(),
        "Canvas API error (502): failed to read response body: connection reset"
    );
}

#[tokio::test]
async fn test_empty_error_body_uses_status_reason() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/courses/1"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&format!("{}/api/v1", mock_server.uri()));
    let err = client
        .send(Method::DELETE, "/courses/1", RequestConfig::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(502));
    assert_eq!(err.to_string(), "Canvas API error (502): Bad Gateway");
}

#[tokio::test]
async fn test_retries_exhausted_returns_last_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = test_client(&format!("{}/api/v1", mock_server.uri()));
    let err = client
        .send(Method::GET, "/courses", RequestConfig::new().retries(2))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RemoteApi);
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    // Nothing listens on port 1
    let client = test_client("http://127.0.0.1:1/api/v1");
    let err = client
        .send(Method::GET, "/courses", RequestConfig::new().retries(0))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(matches!(err, Error::Http(_)));
}

#[tokio::test]
async fn test_absolute_url_is_used_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/elsewhere"))
        .and(query_param("page", "bookmark:abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 2}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client("https://canvas.invalid/api/v1");
    let page = client
        .send(
            Method::GET,
            &format!("{}/elsewhere?page=bookmark:abc", mock_server.uri()),
            RequestConfig::new(),
        )
        .await
        .unwrap();

    assert_eq!(page.body, json!([{"id": 2}]));
}
