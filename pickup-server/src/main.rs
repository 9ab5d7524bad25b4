//! pickup-server - MPD collection browser
//!
//! Fetches the library listing from an MPD daemon, rebuilds the
//! category/artist/album/track tree and serves it as JSON.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use pickup_common::config::{ConfigOverrides, TomlConfig};
use pickup_common::TracingObserver;
use pickup_server::mpd::MpdClient;
use pickup_server::refresh::{refresh_state, shared_source, spawn_periodic_refresh};
use pickup_server::{build_router, AppState};
use tokio::signal;
use tracing::{info, warn};

/// Command-line arguments for pickup-server
#[derive(Parser, Debug)]
#[command(name = "pickup-server")]
#[command(about = "Browse an MPD music library over HTTP")]
#[command(version)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long, env = "PICKUP_CONFIG")]
    config: Option<PathBuf>,

    /// MPD address as host:port
    #[arg(long, env = "PICKUP_MPD_ADDRESS")]
    mpd_address: Option<String>,

    /// MPD password
    #[arg(long, env = "PICKUP_MPD_PASSWORD", hide_env_values = true)]
    mpd_password: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PICKUP_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PICKUP_LOG_LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing so the file can set the log level
    let (config, origin) =
        TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    let config = config.apply_overrides(ConfigOverrides {
        mpd_address: args.mpd_address,
        mpd_password: args.mpd_password,
        port: args.port,
        log_level: args.log_level,
    });

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!("Starting pickup-server v{}", env!("CARGO_PKG_VERSION"));
    origin.log();

    let source = shared_source(MpdClient::from_config(&config.mpd));
    info!("Music source: {}", source.describe());

    let state = AppState::new(source, Arc::new(TracingObserver));

    // A daemon that is down at startup is not fatal: serve empty until
    // the next refresh succeeds
    match refresh_state(&state).await {
        Ok(report) => info!(
            "✓ Initial collection: {} categories, {} tracks in {} ms",
            report.categories, report.tracks, report.elapsed_ms
        ),
        Err(e) => warn!("Initial refresh failed, serving an empty collection: {}", e),
    }

    let periodic = if config.server.refresh_interval_secs > 0 {
        let interval = Duration::from_secs(config.server.refresh_interval_secs);
        info!("Refreshing every {:?}", interval);
        Some(spawn_periodic_refresh(state.clone(), interval))
    } else {
        None
    };

    let app = build_router(state);

    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("Invalid listen host: {}", config.server.host))?;
    let addr = SocketAddr::new(host, config.server.port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("pickup-server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(handle) = periodic {
        handle.abort();
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
