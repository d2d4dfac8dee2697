use clap::Parser;
use eyre::{Context, Result};
use std::sync::Arc;
use taskboard::TaskStore;
use taskboard::api::{self, AppState};
use taskboard::config::{CliArgs, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CliArgs::parse();
    let config = Config::load(&cli).context("Failed to load configuration")?;

    // Setup tracing; RUST_LOG wins over the configured level
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut store = TaskStore::new();
    if config.seed_demo {
        store.seed_demo()?;
    }
    let state = Arc::new(AppState::new(store));

    let (addr, handle) = api::start_server(&config.bind_addr, state)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!(%addr, "taskboard listening");

    tokio::select! {
        result = handle => result.context("Server task failed")?,
        _ = tokio::signal::ctrl_c() => tracing::info!("Shutting down"),
    }

    Ok(())
}
