//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, outer timeout, metrics)
//! - Serve on a listener until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{FromRef, Request},
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::http::middleware::track_metrics;
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::latency::{BoundedDelayExecutor, TokioWait, Wait};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState<W = TokioWait> {
    pub executor: Arc<BoundedDelayExecutor<W>>,
    pub config: Arc<ServiceConfig>,
}

impl<W> FromRef<AppState<W>> for Arc<ServiceConfig> {
    fn from_ref(state: &AppState<W>) -> Self {
        state.config.clone()
    }
}

/// HTTP server for the demo service.
pub struct HttpServer<W = TokioWait> {
    router: Router,
    config: ServiceConfig,
    executor: Arc<BoundedDelayExecutor<W>>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_wait(config, TokioWait)
    }
}

impl<W: Wait> HttpServer<W> {
    /// Create a server whose latency endpoint uses a custom wait source.
    pub fn with_wait(config: ServiceConfig, wait: W) -> Self {
        let executor = Arc::new(BoundedDelayExecutor::with_wait(
            config.latency.limits(),
            wait,
        ));

        let state = AppState {
            executor: executor.clone(),
            config: Arc::new(config.clone()),
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            executor,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState<W>) -> Router {
        let trace = TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id(request.headers()),
            )
        });

        Router::new()
            .route("/", get(handlers::home))
            .route("/health", get(handlers::health))
            .route("/api/latency", get(handlers::latency::<W>))
            .route("/api/kubernetes", get(handlers::kubernetes))
            .route("/api/chaos", get(handlers::chaos))
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                    .layer(trace)
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn executor(&self) -> &BoundedDelayExecutor<W> {
        &self.executor
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
