// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Portico — gateway admin service
//
//  Admin API:  axum on tokio
//  Storage:    in-process tables, JSON state file
//  Config:     YAML file + PORTICO_ env overrides
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use anyhow::Context;
use clap::Parser;
use portico_admin::AdminState;
use portico_core::PorticoConfig;
use portico_observability::AdminMetrics;
use portico_store::{EntityStore, FilePersistence, MemoryPersistence, Persistence};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "portico", version, about = "Portico — gateway admin API and config resolver")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "/etc/portico/portico.yaml")]
    config: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// JSON state file; overrides `storage.state_file`.
    #[arg(long)]
    state_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ── Tracing ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with_target(false)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "Portico starting");

    if let Err(e) = run(cli).await {
        error!(error = ?e, "Portico failed to start");
        return Err(e);
    }

    info!("Portico stopped");
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // ── Config ──
    let mut config = if cli.config.exists() {
        info!(path = %cli.config.display(), "Loading config file");
        PorticoConfig::load(Some(cli.config.as_path()))?
    } else {
        info!("No config file found, using defaults");
        PorticoConfig::load(None)?
    };
    if let Some(path) = cli.state_file {
        config.storage.state_file = Some(path);
    }

    // ── Entity store ──
    let persistence: Arc<dyn Persistence> = match &config.storage.state_file {
        Some(path) => {
            info!(path = %path.display(), "Using JSON state file");
            Arc::new(FilePersistence::new(path))
        }
        None => {
            info!("No state file configured, state is in-memory only");
            Arc::new(MemoryPersistence)
        }
    };
    let store = Arc::new(
        EntityStore::open(persistence)
            .await
            .context("failed to open entity store")?,
    );

    // ── Built-in plugin services ──
    if config.seed.enabled {
        portico_store::seed_plugin_services(&store)
            .await
            .context("failed to seed plugin services")?;
    }

    // ── Admin API ──
    let metrics = Arc::new(AdminMetrics::new(config.metrics.enabled)?);
    let state = Arc::new(AdminState::new(store, metrics, config.admin.cors.clone()));

    portico_admin::start_admin(&config.admin.addr, state, shutdown_signal()).await
}

/// Resolves on SIGINT, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received, stopping...");
}
