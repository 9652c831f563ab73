use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{
    CustomUserError, InquireError, Password, Text,
    autocompletion::{Autocomplete, Replacement},
};
use weather_core::{
    CITY_SUGGESTIONS, Config, FetchTicket, SubmitEvent, WeatherApiProvider, WeatherProvider,
    WeatherWidget, provider_from_config,
    render::{HEADLINE, render},
    suggestions::suggest,
};
use tracing::debug;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather for a city")]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Prompt for cities and show their weather until Esc/Ctrl-C (default).
    Interactive,

    /// Show the weather for one city and exit.
    Show {
        /// City name, sent as typed.
        city: String,
    },

    /// Configure the endpoint and API key.
    Configure,

    /// List the suggested city names.
    Suggestions,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config_path = self.config;

        match self.command.unwrap_or(Command::Interactive) {
            Command::Interactive => {
                let provider = load_provider(config_path.as_deref())?;
                interactive(WeatherWidget::new(provider)).await
            }
            Command::Show { city } => {
                let provider = load_provider(config_path.as_deref())?;
                let mut widget = WeatherWidget::new(provider);

                let mut out = io::stdout();
                writeln!(out, "{HEADLINE}")?;
                widget.on_city_input_change(city);
                submit(&mut widget, &mut out).await?;
                Ok(())
            }
            Command::Configure => configure(config_path.as_deref()),
            Command::Suggestions => {
                for city in CITY_SUGGESTIONS {
                    println!("{city}");
                }
                Ok(())
            }
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn load_provider(path: Option<&Path>) -> anyhow::Result<WeatherApiProvider> {
    let config = load_config(path)?;
    provider_from_config(&config)
}

async fn interactive<P: WeatherProvider>(mut widget: WeatherWidget<P>) -> anyhow::Result<()> {
    let mut out = io::stdout();
    writeln!(out, "{HEADLINE}")?;
    mount(&mut widget, &mut out).await?;

    loop {
        let answer = Text::new("City:")
            .with_placeholder("Enter city")
            .with_autocomplete(CityCompleter)
            .with_help_message("Enter to get weather, Esc to quit")
            .prompt();

        match answer {
            Ok(city) => {
                widget.on_city_input_change(city);
                submit(&mut widget, &mut out).await?;
            }
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city"),
        }
    }

    Ok(())
}

/// First activation: looks up the (empty) city. Does nothing once mounted.
async fn mount<P: WeatherProvider>(
    widget: &mut WeatherWidget<P>,
    out: &mut impl Write,
) -> io::Result<()> {
    match widget.begin_mount() {
        Some(ticket) => complete(widget, ticket, out).await,
        None => Ok(()),
    }
}

async fn submit<P: WeatherProvider>(
    widget: &mut WeatherWidget<P>,
    out: &mut impl Write,
) -> io::Result<()> {
    let mut event = SubmitEvent::new();
    let ticket = widget.begin_submit(&mut event);
    complete(widget, ticket, out).await
}

/// Print the loading view while the request is out, then the settled view.
async fn complete<P: WeatherProvider>(
    widget: &mut WeatherWidget<P>,
    ticket: FetchTicket,
    out: &mut impl Write,
) -> io::Result<()> {
    writeln!(out, "{}", render(&widget.view()))?;
    out.flush()?;

    let outcome = widget.provider().current(ticket.city()).await;
    if !widget.settle(&ticket, outcome) {
        debug!(seq = ticket.seq(), "response superseded before it could be shown");
    }

    writeln!(out, "{}", render(&widget.view()))
}

fn configure(path: Option<&Path>) -> anyhow::Result<()> {
    let mut config = load_config(path)?;

    let endpoint = Text::new("Endpoint:")
        .with_default(&config.endpoint)
        .with_help_message("WeatherAPI.com base URL, or a proxy that adds the key itself")
        .prompt()
        .context("Failed to read endpoint")?;
    config.endpoint = endpoint.trim().to_string();

    let api_key = Password::new("API key:")
        .without_confirmation()
        .with_help_message("Leave empty when the endpoint is a key-injecting proxy")
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    let saved_to = match path {
        Some(path) => {
            config.save_to(path)?;
            path.to_path_buf()
        }
        None => {
            config.save()?;
            Config::config_file_path()?
        }
    };

    debug!(
        path = %saved_to.display(),
        has_key = config.api_key().is_some(),
        "configuration saved"
    );
    println!("Configuration saved to {}", saved_to.display());
    Ok(())
}

/// Offers the suggestion table as completions. Hints only: any text is accepted.
#[derive(Debug, Clone, Default)]
struct CityCompleter;

impl Autocomplete for CityCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        Ok(suggest(input).into_iter().map(str::to_string).collect())
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion)
    }
}
