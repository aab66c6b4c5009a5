//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::time::Duration;

use sre_demo::latency::Wait;
use sre_demo::{HttpServer, ServiceConfig, Shutdown};
use tokio::net::TcpListener;

/// A server running on an ephemeral port. Shuts down when dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.addr, path_and_query)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the service with the production wait.
#[allow(dead_code)]
pub async fn spawn_server(config: ServiceConfig) -> TestServer {
    spawn(HttpServer::new(config)).await
}

/// Start an already-built server, e.g. one with an injected wait.
pub async fn spawn<W: Wait>(server: HttpServer<W>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer { addr, shutdown }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(20))
        .build()
        .unwrap()
}

/// Wait source that ignores the request and stalls for a fixed time.
#[allow(dead_code)]
#[derive(Clone)]
pub struct StallWait(pub Duration);

impl Wait for StallWait {
    fn wait(&self, _duration: Duration) -> impl std::future::Future<Output = ()> + Send + 'static {
        tokio::time::sleep(self.0)
    }
}
