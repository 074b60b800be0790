//! Form validation service (wiform-ve) - Main entry point
//!
//! HTTP front end for the repair & validation engine. Loads bootstrap
//! configuration, builds one shared [`FormEngine`] and serves it with axum.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use wiform_common::config::resolve_config;
use wiform_ve::logging::init_tracing;
use wiform_ve::{build_router, AppState, FormEngine};

/// Command-line arguments for wiform-ve
#[derive(Parser, Debug)]
#[command(name = "wiform-ve")]
#[command(about = "Form 283 repair & validation service")]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address (overrides config)
    #[arg(long, env = "WIFORM_VE_HOST")]
    host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long, env = "WIFORM_VE_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (config, source) =
        resolve_config(args.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.logging)?;

    info!(
        "Starting wiform validation engine (wiform-ve) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    source.log();

    let engine = Arc::new(FormEngine::with_config(&config.refiner));
    info!(
        rules = ?engine.refiner().rule_names(),
        id_truncation = ?config.refiner.id_truncation,
        "Form engine initialized"
    );

    let app = build_router(AppState::new(engine));

    let host = args.host.unwrap_or(config.host);
    let port = args.port.unwrap_or(config.port);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    info!("wiform-ve listening on http://{}", addr);
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
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
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
