//! claimcheck service entry point.

mod cli;

use anyhow::Context;
use clap::Parser;
use claimcheck::server::{self, AppState};
use cli::Cli;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    info!("claimcheck v{}", env!("CARGO_PKG_VERSION"));

    let config = cli.into_config().context("invalid configuration")?;
    info!(
        model = %config.openai.model,
        daily_limit = config.daily_limit,
        timeout_secs = config.request_timeout.as_secs(),
        verification = config.verification_enabled(),
        "configuration loaded"
    );

    let state = AppState::from_config(&config);
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("listening on {}", listener.local_addr()?);

    server::serve(listener, state, shutdown_signal()).await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
