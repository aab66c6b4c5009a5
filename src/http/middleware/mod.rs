//! Axum middleware used by the service router.

pub mod metrics;

pub use self::metrics::track_metrics;
