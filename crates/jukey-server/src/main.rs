mod auth;
mod config;
mod error;
mod handlers;
mod logging;
mod router;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;
use crate::error::StartupError;
use crate::state::AppState;

/// Anime metadata backend for the Jukey frontend, backed by AniList.
#[derive(Debug, Parser)]
#[command(name = "jukey", version, about)]
struct Cli {
    /// Config file to use instead of the per-user one.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overriding `server.bind`.
    #[arg(short, long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("jukey: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), StartupError> {
    let (mut config, config_file) = AppConfig::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }

    let _log_guard = logging::init(&config.logging)?;
    match &config_file {
        Some(path) => tracing::info!(path = %path.display(), "loaded config"),
        None => tracing::info!("using built-in config"),
    }

    let state = AppState::from_config(&config)?;
    tracing::info!(
        api_url = state.anilist.api_url(),
        timeout_secs = config.upstream.timeout_secs,
        "AniList client ready"
    );

    let app = router::build(state, &config.server.cors_origins)?;
    let listener = tokio::net::TcpListener::bind(config.server.bind).await?;
    tracing::info!(addr = %config.server.bind, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
