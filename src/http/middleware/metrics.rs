//! Per-route request metrics.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};

use crate::observability::metrics;

/// Record count and duration of every routed request.
///
/// Install with `Router::route_layer` so the matched route template is
/// available; raw paths would explode label cardinality.
pub async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let response = next.run(request).await;
    metrics::record_request(&path, response.status().as_u16(), start);
    response
}
