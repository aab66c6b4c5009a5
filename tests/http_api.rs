//! End-to-end tests over a real socket.

use std::time::{Duration, Instant};

use reqwest::StatusCode;
use serde_json::{json, Value};
use sre_demo::{HttpServer, ServiceConfig};

mod common;

#[tokio::test]
async fn test_home_and_health() {
    let server = common::spawn_server(ServiceConfig::default()).await;
    let client = common::client();

    let res = client.get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"status": "running", "service": "sre-demo-app"}));

    let res = client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"status": "healthy"}));
}

#[tokio::test]
async fn test_latency_zero_is_fast() {
    let server = common::spawn_server(ServiceConfig::default()).await;

    let start = Instant::now();
    let res = common::client()
        .get(server.url("/api/latency?delay_ms=0"))
        .send()
        .await
        .unwrap();
    let elapsed = start.elapsed();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"status": "success", "delay_ms": 0}));
    assert!(elapsed < Duration::from_millis(500), "elapsed {:?}", elapsed);
}

#[tokio::test]
async fn test_latency_default_waits_one_hundred_ms() {
    let server = common::spawn_server(ServiceConfig::default()).await;

    let start = Instant::now();
    let res = common::client()
        .get(server.url("/api/latency"))
        .send()
        .await
        .unwrap();
    let elapsed = start.elapsed();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["delay_ms"], 100);
    assert!(elapsed >= Duration::from_millis(100));
}

#[tokio::test]
async fn test_latency_over_maximum_rejected_immediately() {
    let server = common::spawn_server(ServiceConfig::default()).await;

    let start = Instant::now();
    let res = common::client()
        .get(server.url("/api/latency?delay_ms=5001"))
        .send()
        .await
        .unwrap();
    let elapsed = start.elapsed();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({"detail": "Requested delay exceeds the maximum allowed limit of 5000ms."})
    );
    assert!(elapsed < Duration::from_millis(500), "elapsed {:?}", elapsed);
}

#[tokio::test]
async fn test_latency_stalled_wait_returns_gateway_timeout() {
    let mut config = ServiceConfig::default();
    config.latency.max_delay_ms = 200;
    config.latency.deadline_grace_ms = 100;
    config.latency.default_delay_ms = 50;

    let server = HttpServer::with_wait(config, common::StallWait(Duration::from_secs(10)));
    let server = common::spawn(server).await;

    let start = Instant::now();
    let res = common::client()
        .get(server.url("/api/latency?delay_ms=150"))
        .send()
        .await
        .unwrap();
    let elapsed = start.elapsed();

    assert_eq!(res.status(), StatusCode::GATEWAY_TIMEOUT);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"detail": "Request processing timed out on the server."}));
    assert!(elapsed >= Duration::from_millis(300));
    assert!(elapsed < Duration::from_secs(2), "elapsed {:?}", elapsed);
}

#[tokio::test]
async fn test_latency_malformed_parameter() {
    let server = common::spawn_server(ServiceConfig::default()).await;

    let res = common::client()
        .get(server.url("/api/latency?delay_ms=abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("delay_ms"));
}

#[tokio::test]
async fn test_kubernetes_faults() {
    let server = common::spawn_server(ServiceConfig::default()).await;
    let client = common::client();

    let res = client.get(server.url("/api/kubernetes")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"detail": "Service unavailable due to pod crash"}));

    let res = client
        .get(server.url("/api/kubernetes?error_type=pod_crash"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

    let res = client
        .get(server.url("/api/kubernetes?error_type=image_pull_backoff"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"detail": "Unknown error_type specified"}));
}

#[tokio::test]
async fn test_kubernetes_malformed_query_is_json_400() {
    let server = common::spawn_server(ServiceConfig::default()).await;
    let client = common::client();

    let res = client
        .get(server.url("/api/kubernetes?error_type=a&error_type=b"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.headers()["content-type"], "application/json");
    let body: Value = res.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("error_type"));
}

#[tokio::test]
async fn test_chaos_extremes() {
    let server = common::spawn_server(ServiceConfig::default()).await;
    let client = common::client();

    for _ in 0..5 {
        let res = client
            .get(server.url("/api/chaos?failure_rate=1.0"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body, json!({"detail": "Random failure occurred"}));

        let res = client
            .get(server.url("/api/chaos?failure_rate=0"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await.unwrap();
        assert_eq!(
            body,
            json!({"status": "success", "message": "Request survived the chaos!"})
        );
    }

    let res = client
        .get(server.url("/api/chaos?failure_rate=often"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chaos_uses_configured_default_rate() {
    let mut config = ServiceConfig::default();
    config.chaos.default_failure_rate = 1.0;
    let server = common::spawn_server(config).await;

    let res = common::client()
        .get(server.url("/api/chaos"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
