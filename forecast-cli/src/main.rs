//! Binary crate for the `forecast` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive location and forecast screens
//! - Human-friendly output formatting

use clap::Parser;
use forecast_core::Config;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod render;
mod screens;

const DEFAULT_LOG_FILTER: &str = "forecast_core=warn,forecast=warn";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    let config = Config::load()?;

    init_tracing(cmd.log_level.as_deref(), &config);

    cmd.run(config).await
}

/// `RUST_LOG` wins, then `--log-level`, then the config file.
fn init_tracing(cli_filter: Option<&str>, config: &Config) {
    let fallback = cli_filter
        .or(config.log_filter.as_deref())
        .unwrap_or(DEFAULT_LOG_FILTER);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
