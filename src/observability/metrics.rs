//! Metrics collection and exposition.
//!
//! # Metrics
//! - `sre_demo_requests_total` (counter): requests by path, status
//! - `sre_demo_request_duration_seconds` (histogram): latency by path
//! - `sre_demo_delay_outcomes_total` (counter): executor outcomes
//! - `sre_demo_chaos_outcomes_total` (counter): chaos rolls
//!
//! Recording is a no-op until a recorder is installed, so handlers can
//! record unconditionally.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::chaos::ChaosOutcome;
use crate::latency::DelayOutcome;

pub const REQUESTS_TOTAL: &str = "sre_demo_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "sre_demo_request_duration_seconds";
pub const DELAY_OUTCOMES_TOTAL: &str = "sre_demo_delay_outcomes_total";
pub const CHAOS_OUTCOMES_TOTAL: &str = "sre_demo_chaos_outcomes_total";

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(path: &str, status: u16, start: Instant) {
    counter!(
        REQUESTS_TOTAL,
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(REQUEST_DURATION_SECONDS, "path" => path.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_delay_outcome(outcome: &DelayOutcome) {
    counter!(DELAY_OUTCOMES_TOTAL, "outcome" => outcome.label()).increment(1);
}

pub fn record_chaos_outcome(outcome: ChaosOutcome) {
    counter!(CHAOS_OUTCOMES_TOTAL, "outcome" => outcome.label()).increment(1);
}
