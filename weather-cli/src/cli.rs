use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use weather_core::{Config, OpenWeatherClient, WeatherApp, config::API_KEY_ENV};

use crate::render::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather and a 5-day forecast")]
pub struct Cli {
    /// Increase log verbosity (default warn; -v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and default city.
    Configure,

    /// Show the default city, then prompt for more cities until cancelled.
    Watch,

    /// Show weather for a single city and exit.
    Show {
        /// City name, e.g. "Lagos,NG" or "Kaduna".
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Watch) {
            Command::Configure => configure(),
            Command::Watch => watch(Config::load()?).await,
            Command::Show { city } => show(Config::load()?, city).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key);
    }

    let default_city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;
    if !default_city.trim().is_empty() {
        config.default_city = default_city.trim().to_string();
    }

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

async fn watch(config: Config) -> anyhow::Result<()> {
    warn_if_no_key(&config);

    let mut app = WeatherApp::new(OpenWeatherClient::from_config(&config), config.default_city.clone());
    app.mount().await;
    println!("{}", render(app.state(), &config.icon_base_url));

    loop {
        let input = tokio::task::spawn_blocking(|| {
            Text::new("City:")
                .with_placeholder("Lagos,NG or Kaduna")
                .with_help_message("Esc to quit")
                .prompt()
        })
        .await
        .context("Prompt task failed")?;

        match input {
            Ok(text) => {
                app.set_input(text);
                app.submit().await;
                println!("{}", render(app.state(), &config.icon_base_url));
            }
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city"),
        }
    }

    Ok(())
}

async fn show(config: Config, city: String) -> anyhow::Result<()> {
    warn_if_no_key(&config);

    let mut app = WeatherApp::new(OpenWeatherClient::from_config(&config), config.default_city.clone());
    app.set_input(city);
    app.submit().await;
    println!("{}", render(app.state(), &config.icon_base_url));
    Ok(())
}

fn warn_if_no_key(config: &Config) {
    if !config.has_api_key() {
        tracing::warn!(
            "No API key configured. Set {API_KEY_ENV} or run `weather configure`."
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_watch() {
        let cli = Cli::try_parse_from(["weather"]).expect("parses");
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn show_takes_a_city() {
        let cli = Cli::try_parse_from(["weather", "-vv", "show", "Lagos,NG"]).expect("parses");
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Command::Show { city }) => assert_eq!(city, "Lagos,NG"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_requires_a_city() {
        assert!(Cli::try_parse_from(["weather", "show"]).is_err());
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
