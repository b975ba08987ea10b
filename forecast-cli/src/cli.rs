use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use forecast_core::{App, Config, LocationInput, RetrieverState};
use inquire::Text;

use crate::{render, screens};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Saved locations and daily weather forecasts")]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset, e.g. "forecast_core=debug".
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage locations and fetch forecasts interactively (default).
    Interactive,

    /// Fetch today's forecast for a single location.
    Show {
        /// Display name of the location.
        name: String,

        /// Latitude in degrees, -90 to 90.
        #[arg(long, allow_hyphen_values = true)]
        lat: String,

        /// Longitude in degrees, -180 to 180.
        #[arg(long, allow_hyphen_values = true)]
        lon: String,
    },

    /// Set the forecast service hosts.
    Configure,
}

impl Cli {
    pub async fn run(self, config: Config) -> anyhow::Result<()> {
        tracing::debug!(command = ?self.command, api_base = %config.service.api_base, "starting");

        match self.command.unwrap_or(Command::Interactive) {
            Command::Interactive => {
                let app = App::from_config(&config)?;
                screens::run(app).await
            }
            Command::Show { name, lat, lon } => show(&config, &name, &lat, &lon).await,
            Command::Configure => configure(config),
        }
    }
}

async fn show(config: &Config, name: &str, lat: &str, lon: &str) -> anyhow::Result<()> {
    let mut app = App::from_config(config)?;

    let input = LocationInput::from_raw(name, lat, lon);
    let name = input.name.clone();

    let errors = app.add_location(input);
    if !errors.is_valid() {
        bail!("Invalid location:\n{}", render::field_errors(&errors).join("\n"));
    }

    app.select(&name);
    println!("{}", render::LOADING);

    app.fetch().await;

    let retriever = app.retriever();
    match retriever.state() {
        RetrieverState::Success(summary) => {
            println!("{}", render::summary_card(summary, retriever.image_url()));
            Ok(())
        }
        RetrieverState::Failure(message) => bail!("{message}"),
        RetrieverState::Idle | RetrieverState::Loading => Ok(()),
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_base = Text::new("Forecast API base URL:")
        .with_default(&config.service.api_base)
        .prompt()
        .context("Failed to read forecast API base URL")?;

    let image_base = Text::new("Forecast image base URL:")
        .with_default(&config.service.image_base)
        .prompt()
        .context("Failed to read forecast image base URL")?;

    config.service.api_base = api_base.trim().trim_end_matches('/').to_string();
    config.service.image_base = image_base.trim().trim_end_matches('/').to_string();
    config.save()?;
    tracing::info!(api_base = %config.service.api_base, image_base = %config.service.image_base, "configuration saved");

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
