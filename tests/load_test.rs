//! Concurrent load against the latency endpoint.

use std::time::{Duration, Instant};

use reqwest::StatusCode;
use serde_json::Value;
use sre_demo::ServiceConfig;

mod common;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_latency_requests_are_independent() {
    let server = common::spawn_server(ServiceConfig::default()).await;
    let client = common::client();

    // Interleave waits of 0..=950ms with over-limit requests.
    let delays: Vec<u64> = (0..20)
        .map(|i| if i % 5 == 4 { 6000 + i } else { i * 50 })
        .collect();

    let start = Instant::now();
    let mut tasks = Vec::new();
    for delay in delays.iter().copied() {
        let client = client.clone();
        let url = server.url(&format!("/api/latency?delay_ms={}", delay));
        tasks.push(tokio::spawn(async move {
            let req_start = Instant::now();
            let res = client.get(&url).send().await.unwrap();
            let status = res.status();
            let body: Value = res.json().await.unwrap();
            (delay, status, body, req_start.elapsed())
        }));
    }

    for task in tasks {
        let (delay, status, body, elapsed) = task.await.unwrap();
        if delay > 5000 {
            assert_eq!(status, StatusCode::BAD_REQUEST, "delay {}", delay);
            assert!(elapsed < Duration::from_millis(500), "delay {} took {:?}", delay, elapsed);
        } else {
            assert_eq!(status, StatusCode::OK, "delay {}", delay);
            assert_eq!(body["delay_ms"], delay);
            assert!(elapsed >= Duration::from_millis(delay));
            assert!(
                elapsed < Duration::from_millis(delay + 500),
                "delay {} took {:?}",
                delay,
                elapsed
            );
        }
    }

    // Requests ran concurrently, not back to back.
    let total = start.elapsed();
    assert!(total < Duration::from_secs(3), "total {:?}", total);
}
