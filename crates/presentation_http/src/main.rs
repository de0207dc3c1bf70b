//! GPT action API server
//!
//! Serves the sample action API with its specification document.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use infrastructure::{AppConfig, init_telemetry};
use presentation_http::{demo, routes, set_expose_internal_errors};
use tokio::{net::TcpListener, signal};
use tracing::info;

/// GPT action API server
#[derive(Parser)]
#[command(name = "gpt-api-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, env = "GPT_API_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration before logging so the log settings can come from it
    let config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    init_telemetry(&config.server.telemetry())?;
    info!("GPT API server v{} starting...", env!("CARGO_PKG_VERSION"));

    set_expose_internal_errors(config.server.expose_internal_errors);

    let api = demo::build_demo_api(config.api.clone().into_api_info())?;
    let app = routes::create_router(api, &config.server);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Specification document: http://{}/gpt/schema", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
}
