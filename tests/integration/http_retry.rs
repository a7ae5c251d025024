//! Integration tests for the HTTP resilience layer against a fake server.

use super::test_utils::{fast_client, fast_config, fast_policy};
use rdcli::error::ClientError;
use rdcli::http::{ResilientClient, RetryState};
use serde_json::json;
use std::time::{Duration, Instant};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.map(|r| r.len()).unwrap_or(0)
}

#[tokio::test]
async fn test_recovers_after_three_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/collections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": true, "items": []})))
        .mount(&server)
        .await;

    let client = fast_client(&server.uri());
    let response = client.get("collections", &[]).await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, json!({"result": true, "items": []}));
    assert_eq!(response.attempt.retry_count, 3);
    assert_eq!(response.attempt.state, RetryState::Success);
    assert_eq!(request_count(&server).await, 4);
}

#[tokio::test]
async fn test_gives_up_after_max_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"error": "maintenance"})))
        .mount(&server)
        .await;

    let client = fast_client(&server.uri());
    let err = client.get("raindrops/0", &[]).await.unwrap_err();

    match err {
        ClientError::Api(api) => {
            assert_eq!(api.http_status, Some(503));
            assert_eq!(api.message, "maintenance");
            let context = api.context.unwrap();
            assert_eq!(context.method, "GET");
            assert!(context.url.ends_with("/raindrops/0"));
        }
        other => panic!("expected api error, got {:?}", other),
    }
    assert_eq!(request_count(&server).await, 4);
}

#[tokio::test]
async fn test_request_timeout_status_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(408))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": true})))
        .mount(&server)
        .await;

    let response = fast_client(&server.uri()).get("tags", &[]).await.unwrap();
    assert_eq!(response.attempt.retry_count, 1);
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = fast_client(&server.uri())
        .get("raindrop/42", &[])
        .await
        .unwrap_err();

    match err {
        ClientError::Api(api) => {
            assert_eq!(api.http_status, Some(404));
            assert_eq!(api.message, "Request failed with status code 404");
        }
        other => panic!("expected api error, got {:?}", other),
    }
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_rate_limit_fails_immediately() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("x-ratelimit-limit", "120")
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", "1900000000"),
        )
        .mount(&server)
        .await;

    let err = fast_client(&server.uri())
        .get("collections", &[])
        .await
        .unwrap_err();

    match err {
        ClientError::RateLimited(limit) => {
            assert_eq!(limit.limit, 120);
            assert_eq!(limit.remaining, Some(0));
            assert_eq!(limit.reset_epoch_seconds, 1_900_000_000);
        }
        other => panic!("expected rate limit error, got {:?}", other),
    }
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_rate_limit_defaults_without_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let before = chrono::Utc::now().timestamp();
    let err = fast_client(&server.uri())
        .get("collections", &[])
        .await
        .unwrap_err();

    match err {
        ClientError::RateLimited(limit) => {
            assert_eq!(limit.limit, 120);
            assert!(limit.reset_epoch_seconds >= before + 60);
            assert!(limit.reset_epoch_seconds <= chrono::Utc::now().timestamp() + 60);
        }
        other => panic!("expected rate limit error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_success_exposes_rate_limit_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-ratelimit-remaining", "117")
                .set_body_string("not json"),
        )
        .mount(&server)
        .await;

    let response = fast_client(&server.uri()).get("user", &[]).await.unwrap();
    assert_eq!(response.rate_limit.remaining, Some(117));
    assert_eq!(response.body, json!("not json"));
}

#[tokio::test]
async fn test_timeout_is_retried_then_normalized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let client = ResilientClient::new(
        fast_config(&server.uri())
            .with_timeout(Duration::from_secs(1))
            .with_retry_policy(fast_policy().with_max_retries(1)),
    )
    .unwrap();
    let err = client.get("collections", &[]).await.unwrap_err();

    match err {
        ClientError::Timeout(timeout) => {
            assert_eq!(timeout.timeout_seconds, 1);
            assert!(timeout.context.is_some());
        }
        other => panic!("expected timeout error, got {:?}", other),
    }
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn test_network_error_has_no_status() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = ResilientClient::new(
        fast_config(&format!("http://127.0.0.1:{}", port))
            .with_retry_policy(fast_policy().with_max_retries(1)),
    )
    .unwrap();
    let err = client.get("collections", &[]).await.unwrap_err();

    match err {
        ClientError::Api(api) => {
            assert_eq!(api.http_status, None);
            assert!(!api.message.is_empty());
        }
        other => panic!("expected api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_sends_bearer_token_and_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/raindrops/0"))
        .and(header("authorization", "Bearer secret"))
        .and(query_param("search", "rust"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let client = ResilientClient::new(fast_config(&server.uri()).with_token("secret")).unwrap();
    let response = client
        .get("raindrops/0", &[("search", "rust".to_string())])
        .await
        .unwrap();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_api_delay_precedes_each_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = ResilientClient::new(
        fast_config(&server.uri()).with_api_delay(Some(Duration::from_millis(150))),
    )
    .unwrap();
    let started = Instant::now();
    let response = client.get("collections", &[]).await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(150));
    assert_eq!(response.body, serde_json::Value::Null);
}
