//! Round-robin HTTP reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                REVERSE PROXY                  │
//!   Client Request   │  ┌─────────┐   ┌─────────────┐   ┌─────────┐ │
//!   ─────────────────┼─▶│  http   │──▶│load_balancer│──▶│ rewrite │─┼──▶ Backend
//!                    │  │ server  │   │ round robin │   │ + client│ │    Server
//!                    │  └─────────┘   └─────────────┘   └─────────┘ │
//!   Client Response  │                                              │
//!   ◀────────────────┼── response relayed back verbatim ◀───────────┼────
//!                    │                                              │
//!                    │  config ─ lifecycle ─ tracing                │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rotary::config::{load_config, BackendConfig, ProxyConfig};
use rotary::lifecycle::signals;
use rotary::ReverseProxy;

#[derive(Parser)]
#[command(name = "rotary")]
#[command(about = "Round-robin HTTP reverse proxy", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides the config file).
    #[arg(short, long)]
    port: Option<u16>,

    /// Backend base URL; repeat once per backend.
    #[arg(short, long = "backend", value_name = "URL")]
    backends: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rotary=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(port) = cli.port {
        config.listener.port = port;
    }
    for url in cli.backends {
        config.backends.push(BackendConfig { url });
    }

    tracing::info!(
        port = config.listener.port,
        backends = config.backends.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "configuration loaded"
    );

    let proxy = Arc::new(ReverseProxy::with_request_timeout(
        &config.backend_urls(),
        config.listener.port,
        Duration::from_secs(config.timeouts.request_secs),
    )?);

    let stopper = proxy.clone();
    tokio::spawn(signals::on_ctrl_c(move || stopper.stop()));

    proxy.start().await?;

    tracing::info!("shutdown complete");
    Ok(())
}
