//! Document gateway binary.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────┐
//!                  │              DOCUMENT GATEWAY                 │
//!                  │                                               │
//!  HTTP request    │  ┌─────────┐   ┌─────────┐   ┌────────────┐  │
//!  ────────────────┼─▶│  http   │──▶│ bridge  │──▶│ execution  │  │
//!                  │  │ server  │   │(validate│   │  engine    │  │
//!                  │  └─────────┘   │ + merge)│   └─────┬──────┘  │
//!                  │                └─────────┘         │         │
//!  HTTP response   │  ┌─────────┐   ┌─────────┐         │         │
//!  ◀───────────────┼──│  wire   │◀──│canonical│◀────────┘         │
//!  (or suppressed) │  │ format  │   │response │                   │
//!                  │  └─────────┘   └─────────┘                   │
//!                  │                                               │
//!                  │  config · observability · lifecycle · plugin  │
//!                  └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use doc_gateway::config::{loader, GatewayConfig};
use doc_gateway::engine::LoopbackEngine;
use doc_gateway::http::GatewayServer;
use doc_gateway::lifecycle::Shutdown;
use doc_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "doc-gateway", about = "Document-oriented API gateway")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => loader::load_config(path)?,
        None => GatewayConfig::default(),
    };

    logging::init(&config.observability.log_filter);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_body_bytes = config.api.max_body_bytes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    tokio::spawn(async move { shutdown.trigger_on_ctrl_c().await });

    // The loopback engine echoes requests back; embedders wire in their
    // own funnel through GatewayServer::new.
    let server = GatewayServer::new(config, Arc::new(LoopbackEngine));
    server.run(listener, receiver).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
