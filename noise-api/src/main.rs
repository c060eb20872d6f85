//! noise-api - environment noise catalog service
//!
//! Opens (or creates) the catalog database, seeds the demo scenes on first
//! start, then serves the HTTP API until Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use clap::Parser;
use noise_api::config::Args;
use noise_api::{build_router, db, AppState};
use noise_common::db::init_database;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "noise_api=info,noise_common=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification first, before any database delay
    info!(
        "Starting environment noise API (noise-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let config = args.resolve().context("Failed to resolve configuration")?;
    config
        .ensure_directories()
        .context("Failed to prepare data directories")?;

    info!("Database path: {}", config.db_path.display());
    info!("Data directory: {}", config.data_dir.display());

    let pool = init_database(&config.db_path)
        .await
        .context("Failed to open catalog database")?;

    let report = db::seed(&pool).await.context("Failed to seed demo catalog")?;
    if report.is_empty() {
        info!("Catalog already populated, seeding skipped");
    }

    let counts = db::count_rows(&pool).await?;
    info!(
        "Catalog: {} scenes, {} tracks, {} presets",
        counts.scenes, counts.tracks, counts.presets
    );

    let app = build_router(AppState::new(pool, config.data_dir.clone()));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("noise-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
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
            Ok(mut stream) => {
                stream.recv().await;
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
