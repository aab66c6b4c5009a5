//! SRE demo service.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ listener ──▶ axum router ──┬─▶ /, /health          (static JSON)
//!                              │          ├─▶ /api/latency        ──▶ BoundedDelayExecutor
//!                              │          │                              │
//!                              │          │                    wait task ┼ deadline timer
//!                              │          │                              ▼
//!                              │          │                   Success / Rejected / TimedOut
//!                              │          ├─▶ /api/kubernetes     (503 / 400)
//!                              │          └─▶ /api/chaos          (500 with probability F)
//!                              │
//!                   request id · trace span · outer timeout · metrics
//! ```

use std::path::PathBuf;

use clap::Parser;

use sre_demo::lifecycle::{signals, startup, Shutdown};
use sre_demo::observability::logging;

#[derive(Parser)]
#[command(name = "sre-demo")]
#[command(about = "Failure-mode demo service for SRE drills", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address (e.g. 0.0.0.0:5000).
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = startup::resolve_config(args.config.as_deref(), args.bind)?;
    logging::init_logging(&config.observability)?;

    tracing::info!("sre-demo v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_delay_ms = config.latency.max_delay_ms,
        deadline_ms = config.latency.limits().deadline().as_millis() as u64,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let (server, listener) = startup::start(config).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_shutdown_signal().await;
        let listeners = shutdown.trigger();
        tracing::info!(listeners, "Shutdown signal broadcast");
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
