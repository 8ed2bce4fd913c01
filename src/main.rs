//! Client connection info & speed test HTTP service.
//!
//! A single-process request/response service: each endpoint is a stateless
//! transformation of an incoming request into a JSON or binary response.
//!
//! ```text
//!     Client Request            ┌─────────────────────────────────────┐
//!     ──────────────────────────┼─▶ middleware (trace, request ID,    │
//!                               │   timeout, CORS, security headers)  │
//!                               │        │                            │
//!                               │        ▼                            │
//!                               │   route table                       │
//!                               │    ├─ /api/myip        client info  │
//!                               │    ├─ /api/test        diagnostics  │
//!                               │    ├─ /api/speedtest/* speed test   │
//!                               │    ├─ /, /about        static pages │
//!                               │    └─ (unmatched)      404 JSON     │
//!     Client Response           │        │                            │
//!     ◀─────────────────────────┼────────┘                            │
//!                               └─────────────────────────────────────┘
//! ```
//!
//! Lookups (IP → geolocation, User-Agent → browser facts) run against
//! immutable local datasets loaded at startup; no request touches shared
//! mutable state.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use netinfo::config::{default_config, load_config};
use netinfo::observability;
use netinfo::HttpServer;

#[derive(Debug, Parser)]
#[command(name = "netinfo", about = "Client connection info & speed test HTTP service")]
struct Args {
    /// Path to a TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => default_config()?,
    };

    observability::logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        static_dir = %config.static_files.directory,
        geoip_city_db = config.geoip.city_db_path.as_deref().unwrap_or("(none)"),
        upload_limit_bytes = config.speedtest.upload_limit_bytes,
        download_size_bytes = config.speedtest.download_size_bytes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
