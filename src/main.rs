//! Prometheus exporter for Panasonic WTY2001 lighting controllers.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::watch;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

use wty2001_exporter::config::LogFormat;
use wty2001_exporter::{ExporterConfig, HttpServer, Upstream};

/// Scrape port. Fixed, not configurable.
const LISTEN_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080);

/// Prometheus exporter for Panasonic WTY2001 lighting controllers.
#[derive(Parser, Debug)]
#[command(name = "wty2001-exporter")]
#[command(about = "Export WTY2001 light brightness as Prometheus metrics")]
#[command(version)]
struct Args {
    /// Path to configuration file (JSON5 format).
    #[arg(short, long)]
    config: Option<String>,

    /// The WTY2001 HTTP API endpoint (overrides config).
    #[arg(long)]
    target: Option<String>,

    /// The file to read mock response from (overrides config).
    #[arg(long)]
    mock: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = if let Some(config_path) = &args.config {
        ExporterConfig::load_from_file(config_path)?
    } else {
        ExporterConfig::default()
    };

    // Override upstream settings from CLI
    if let Some(target) = args.target {
        config.upstream.target = target;
    }
    if let Some(mock) = args.mock {
        config.upstream.mock = mock;
    }
    config.validate()?;

    // Initialize logging
    let log_level = args.log_level.parse().unwrap_or(Level::INFO);
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("wty2001_exporter={}", log_level).parse()?)
        .add_directive(format!("hyper={}", Level::WARN).parse()?);

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }

    info!("Starting WTY2001 exporter");

    if config.upstream.mock.is_empty() {
        info!(target = %config.upstream.target, "Scraping live controller endpoint");
    } else {
        info!(mock = %config.upstream.mock, "Scraping mock response file");
    }

    // Create shutdown signal
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Select the upstream source once for the process lifetime
    let upstream = Arc::new(Upstream::from_config(&config.upstream));

    let http_server = HttpServer::new(upstream, LISTEN_ADDR);

    // Start HTTP server
    let http_shutdown = shutdown_rx.clone();
    let http_task = tokio::spawn(async move {
        if let Err(e) = http_server.run(http_shutdown).await {
            error!("HTTP server error: {}", e);
        }
    });

    // Wait for shutdown signal
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = async {
            #[cfg(unix)]
            {
                let mut sigterm = tokio::signal::unix::signal(
                    tokio::signal::unix::SignalKind::terminate()
                ).unwrap();
                sigterm.recv().await;
            }
            #[cfg(not(unix))]
            {
                std::future::pending::<()>().await;
            }
        } => {
            info!("Received SIGTERM, shutting down...");
        }
    }

    // Signal shutdown
    shutdown_tx.send(true)?;

    // Wait for the server to drain
    let _ = tokio::time::timeout(Duration::from_secs(5), http_task).await;

    info!("Exporter stopped");
    Ok(())
}
