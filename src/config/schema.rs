//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::chaos::kubernetes::DEFAULT_ERROR_TYPE;
use crate::chaos::random::DEFAULT_FAILURE_RATE;
use crate::latency::{DelayLimits, DEADLINE_GRACE_MS, MAX_DELAY_MS};

/// Root configuration for the demo service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Service identity reported by the home endpoint.
    pub service: ServiceInfoConfig,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Bounded latency endpoint limits.
    pub latency: LatencyConfig,

    /// Random failure endpoint defaults.
    pub chaos: ChaosConfig,

    /// Simulated Kubernetes failure defaults.
    pub kubernetes: KubernetesConfig,

    /// Outer request timeout.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceInfoConfig {
    pub name: String,
}

impl Default for ServiceInfoConfig {
    fn default() -> Self {
        Self {
            name: "sre-demo-app".to_string(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8001").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8001".to_string(),
        }
    }
}

/// Limits for `/api/latency`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LatencyConfig {
    /// Largest delay a caller may request.
    pub max_delay_ms: u64,

    /// Slack on top of `max_delay_ms` before the server-side deadline fires.
    pub deadline_grace_ms: u64,

    /// Delay applied when the caller omits `delay_ms`.
    pub default_delay_ms: u64,
}

impl LatencyConfig {
    pub fn limits(&self) -> DelayLimits {
        DelayLimits::new(self.max_delay_ms, self.deadline_grace_ms)
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            max_delay_ms: MAX_DELAY_MS,
            deadline_grace_ms: DEADLINE_GRACE_MS,
            default_delay_ms: 100,
        }
    }
}

/// Defaults for `/api/chaos`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChaosConfig {
    /// Failure probability when the caller omits `failure_rate`.
    pub default_failure_rate: f64,
}

impl Default for ChaosConfig {
    fn default() -> Self {
        Self {
            default_failure_rate: DEFAULT_FAILURE_RATE,
        }
    }
}

/// Defaults for `/api/kubernetes`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KubernetesConfig {
    /// Fault simulated when the caller omits `error_type`.
    pub default_error_type: String,
}

impl Default for KubernetesConfig {
    fn default() -> Self {
        Self {
            default_error_type: DEFAULT_ERROR_TYPE.to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8001");
        assert_eq!(config.latency.max_delay_ms, 5000);
        assert_eq!(config.latency.deadline_grace_ms, 500);
        assert_eq!(config.latency.default_delay_ms, 100);
        assert_eq!(config.kubernetes.default_error_type, "pod_crash");
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_sections_keep_remaining_defaults() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "0.0.0.0:5000"

            [latency]
            max_delay_ms = 2000

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "0.0.0.0:5000");
        assert_eq!(config.latency.max_delay_ms, 2000);
        assert_eq!(config.latency.deadline_grace_ms, 500);
        assert_eq!(config.latency.limits().max_delay_ms(), 2000);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.observability.log_level, "info");
    }
}
