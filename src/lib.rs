//! SRE demo service library.
//!
//! An HTTP service that simulates latency, timeouts and dependency failures
//! for failure-mode drills. The bounded latency executor lives in
//! [`latency`]; everything else routes to it or to the fault simulators.

pub mod chaos;
pub mod config;
pub mod http;
pub mod latency;
pub mod lifecycle;
pub mod observability;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use latency::{BoundedDelayExecutor, DelayOutcome, DelayRequest};
pub use lifecycle::Shutdown;
