//! showcase-api - Engagement and feed service
//!
//! Serves like/bookmark toggles, engagement snapshots, filtered work feeds,
//! and work submission over HTTP, backed by a SQLite database under the
//! resolved root folder.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::http::HeaderName;
use clap::Parser;
use showcase_api::{build_router, AppState};
use showcase_common::config::{resolve_root_folder, ServiceConfig, ROOT_FOLDER_ENV};
use showcase_common::db::init_database;
use showcase_common::events::EventBus;
use tokio::signal;
use tracing::{error, info};

/// Command-line arguments for showcase-api
#[derive(Parser, Debug)]
#[command(name = "showcase-api")]
#[command(about = "Engagement and feed service for the showcase platform")]
#[command(version)]
struct Args {
    /// Root folder holding showcase.toml and the database
    #[arg(short, long, env = "SHOWCASE_ROOT")]
    root_folder: Option<PathBuf>,

    /// Port to listen on (overrides showcase.toml)
    #[arg(short, long, env = "SHOWCASE_PORT")]
    port: Option<u16>,

    /// Interface to bind (overrides showcase.toml)
    #[arg(long, env = "SHOWCASE_HOST")]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,showcase_api=debug,tower_http=debug".into()),
        )
        .init();

    // Build identification before anything that can stall
    info!(
        "Starting showcase-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let root_folder = resolve_root_folder(args.root_folder.as_deref(), ROOT_FOLDER_ENV);
    std::fs::create_dir_all(&root_folder)
        .with_context(|| format!("Failed to create root folder {}", root_folder.display()))?;
    info!("Root folder: {}", root_folder.display());

    let mut config = ServiceConfig::load(&root_folder)?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    let db_path = config.database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = match init_database(&db_path, config.max_connections).await {
        Ok(pool) => {
            info!("✓ Connected to database");
            pool
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    let identity_header = HeaderName::try_from(config.identity_header.as_str())
        .with_context(|| format!("Invalid identity_header {:?}", config.identity_header))?;
    info!("Caller identity read from header {}", identity_header);

    let state = AppState::new(pool, EventBus::new(config.event_capacity))
        .with_identity_header(identity_header);
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("showcase-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
                error!("Failed to install terminate handler: {}", e);
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
