//! Authenticated raw-content proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                              ┌──────────────────────────────────────────────┐
//!                              │                  GH-PROXY                    │
//!     Client Request           │  ┌─────────┐    ┌──────────┐    ┌─────────┐  │
//!     ─────────────────────────┼─▶│  http   │───▶│ routing  │───▶│  relay  │──┼──▶ Upstream
//!                              │  │ server  │    │ matcher  │    │ client  │  │    (raw host /
//!     Client Response          │  └─────────┘    └──────────┘    └────┬────┘  │     main host)
//!     ◀────────────────────────┼───────────────────────────────────────┘       │
//!                              │  ┌────────────────────────────────────────┐  │
//!                              │  │ config · observability · lifecycle     │  │
//!                              │  └────────────────────────────────────────┘  │
//!                              └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use gh_proxy::config::{load_config, load_from_env};
use gh_proxy::lifecycle::signals::spawn_signal_listener;
use gh_proxy::observability::{logging, metrics};
use gh_proxy::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "gh-proxy")]
#[command(about = "Authenticated proxy for raw repository files and release assets", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults plus environment are used otherwise.
    #[arg(short, long, env = "GH_PROXY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => load_from_env()?,
    };

    logging::init(&config.observability);
    tracing::info!("gh-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        user_agent = %config.upstream.user_agent,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // validated at load time
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    spawn_signal_listener(&shutdown);

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
