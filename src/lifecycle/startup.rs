//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve configuration (file, defaults, CLI overrides) and validate it
//! - Prove the runtime can run a bounded wait before taking traffic
//! - Start the metrics exporter when enabled
//! - Bind the listener last
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Scheduling problems are startup errors, never per-request ones

use std::net::SocketAddr;
use std::path::Path;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{load_config, validate_config, ConfigError, ServiceConfig};
use crate::http::HttpServer;
use crate::latency::SelfCheckError;
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("timer self-check failed: {0}")]
    Timer(#[from] SelfCheckError),

    #[error("failed to install metrics exporter: {0}")]
    Metrics(#[from] BuildError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },
}

/// Load the config file if given, else defaults, then apply overrides.
pub fn resolve_config(
    path: Option<&Path>,
    bind_override: Option<String>,
) -> Result<ServiceConfig, StartupError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    if let Some(bind_address) = bind_override {
        config.listener.bind_address = bind_address;
    }

    // Overrides bypass the loader, so check again.
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Build the server and bind its listener.
pub async fn start(config: ServiceConfig) -> Result<(HttpServer, TcpListener), StartupError> {
    validate_config(&config).map_err(ConfigError::Validation)?;

    let server = HttpServer::new(config);
    server.executor().self_check().await?;
    tracing::debug!("Timer self-check passed");

    let observability = &server.config().observability;
    if observability.metrics_enabled {
        // Validated above.
        if let Ok(addr) = observability.metrics_address.parse::<SocketAddr>() {
            metrics::init_metrics(addr)?;
        }
    }

    let address = server.config().listener.bind_address.clone();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    Ok((server, listener))
}
