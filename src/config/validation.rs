//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges and cross-field
//! constraints. Every violation is reported, not just the first.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("latency.max_delay_ms must be greater than zero")]
    ZeroMaxDelay,

    #[error("latency.default_delay_ms ({default_ms}) exceeds latency.max_delay_ms ({max_ms})")]
    DefaultDelayAboveMax { default_ms: u64, max_ms: u64 },

    #[error("chaos.default_failure_rate must be within [0, 1], got {0}")]
    FailureRateOutOfRange(f64),

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),

    #[error(
        "timeouts.request_secs ({request_ms}ms) must exceed the latency deadline ({deadline_ms}ms)"
    )]
    RequestTimeoutTooShort { request_ms: u64, deadline_ms: u64 },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let latency = &config.latency;
    if latency.max_delay_ms == 0 {
        errors.push(ValidationError::ZeroMaxDelay);
    }
    if latency.default_delay_ms > latency.max_delay_ms {
        errors.push(ValidationError::DefaultDelayAboveMax {
            default_ms: latency.default_delay_ms,
            max_ms: latency.max_delay_ms,
        });
    }

    let rate = config.chaos.default_failure_rate;
    if !(0.0..=1.0).contains(&rate) {
        errors.push(ValidationError::FailureRateOutOfRange(rate));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    // The outer timeout layer must never pre-empt the executor's own 504.
    let request_ms = config.timeouts.request_secs.saturating_mul(1000);
    let deadline_ms = latency.max_delay_ms.saturating_add(latency.deadline_grace_ms);
    if request_ms <= deadline_ms {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request_ms,
            deadline_ms,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
