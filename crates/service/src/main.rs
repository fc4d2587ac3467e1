//! veilbin-server - blind pastebin service
//!
//! Stores encrypted records for registered sites. The server holds only
//! secret fingerprints; it can verify identity but never decrypt a
//! payload.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::sync::watch;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use service::{Config, ServiceState};

/// veilbin-server - blind pastebin service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port for the API server
    #[arg(long, default_value = "3001")]
    port: u16,

    /// Path to SQLite database file (in-memory if omitted)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Handshake session time-to-live in seconds
    #[arg(long, default_value = "300")]
    session_ttl: u64,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
    let log_level: tracing::Level = args.log_level.parse().unwrap_or(tracing::Level::INFO);
    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(non_blocking_writer)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(fmt_layer).init();

    tracing::info!("Starting veilbin server");

    let config = Config {
        listen_addr: Some(SocketAddr::from_str(&format!("0.0.0.0:{}", args.port))?),
        sqlite_path: args.database,
        session_ttl: Duration::from_secs(args.session_ttl),
        log_level,
    };

    let state = match ServiceState::from_config(&config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to create service state: {}", e);
            std::process::exit(1);
        }
    };

    // Set up graceful shutdown
    let (shutdown_tx, shutdown_rx) = watch::channel(());
    let graceful_shutdown = async move {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl+c");
        tracing::info!("Received shutdown signal");
        let _ = shutdown_tx.send(());
    };
    tokio::spawn(graceful_shutdown);

    service::http::run(config, state, shutdown_rx).await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
