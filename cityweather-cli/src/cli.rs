use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use cityweather_core::{
    Config, LocationCell, LocationInput, LocationQuery, ViewState, WeatherViewer,
    config::DEFAULT_BASE_URL, provider_from_config,
};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use tracing::debug;

use crate::render::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Current weather and 7-day forecast for a city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI key and base URL in the config file.
    Configure,

    /// Show the weather page for a location.
    Show {
        /// City or place name, sent to the provider exactly as typed.
        location: Option<String>,
    },

    /// Prompt for city names and show the weather for each one.
    Search,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure().await,
            Command::Show { location } => {
                show(LocationQuery::from(location.unwrap_or_default())).await
            }
            Command::Search => search().await,
        }
    }
}

async fn configure() -> Result<()> {
    let mut config = Config::load()?;
    let suggested_url = config.base_url.clone().unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let (api_key, base_url) = tokio::task::spawn_blocking(move || -> Result<(String, String)> {
        let api_key = Password::new("WeatherAPI key:")
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt()
            .context("Failed to read API key")?;

        let base_url = Text::new("Base URL:")
            .with_default(&suggested_url)
            .prompt()
            .context("Failed to read base URL")?;

        Ok((api_key, base_url))
    })
    .await
    .context("Prompt task failed")??;

    config.set_api_key(api_key.trim().to_string());
    config.set_base_url(base_url.trim().to_string());

    let path = config.save()?;
    debug!(path = %path.display(), "configuration saved");
    println!("Saved configuration to {}", path.display());

    Ok(())
}

fn viewer_from_config() -> Result<WeatherViewer> {
    let config = Config::from_environment()?;
    let provider = provider_from_config(&config)?;
    Ok(WeatherViewer::new(provider))
}

async fn show(query: LocationQuery) -> Result<()> {
    if query.is_empty() {
        println!("{}", render(&ViewState::NoLocation));
        return Ok(());
    }

    let mut viewer = viewer_from_config()?;
    viewer.set_location(&query);

    match viewer.settle().await {
        ViewState::Error(message) => bail!(message),
        state => {
            println!("{}", render(&state));
            Ok(())
        }
    }
}

async fn search() -> Result<()> {
    let viewer = viewer_from_config()?;
    let mut states = viewer.subscribe();
    let cell = LocationCell::default();
    let task = tokio::spawn(viewer.run(cell.subscribe()));
    let mut input = LocationInput::default();

    println!("{}", render(&states.borrow()));

    loop {
        let prompt = tokio::task::spawn_blocking(|| Text::new("Enter city name").prompt())
            .await
            .context("Prompt task failed")?;

        let text = match prompt {
            Ok(text) => text,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                debug!("search prompt closed");
                break;
            }
            Err(err) => return Err(err).context("Failed to read city name"),
        };

        input.set_text(text);
        states.borrow_and_update();
        if !input.submit(&cell) {
            continue;
        }

        states.changed().await.context("Weather viewer stopped")?;
        let state = states
            .wait_for(|state| !state.is_loading())
            .await
            .context("Weather viewer stopped")?
            .clone();

        println!("{}", render(&state));
    }

    drop(cell);
    task.await.context("Weather viewer task failed")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn show_keeps_location_verbatim() {
        let cli = Cli::try_parse_from(["cityweather", "show", "New York"]).unwrap();
        match cli.command {
            Command::Show { location } => assert_eq!(location.as_deref(), Some("New York")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_location_is_optional() {
        let cli = Cli::try_parse_from(["cityweather", "show"]).unwrap();
        assert!(matches!(cli.command, Command::Show { location: None }));
    }

    #[tokio::test]
    async fn show_without_location_needs_no_config() {
        show(LocationQuery::default()).await.unwrap();
    }
}
