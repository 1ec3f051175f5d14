use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use weathercard_core::{Config, Controller, WeatherProvider, provider_from_config, render};

use crate::session;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weathercard", version, about = "Current weather for a city, in your terminal")]
pub struct Cli {
    /// weatherapi.com API key; overrides the configured one.
    #[arg(long, env = "WEATHERAPI_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Defaults to an interactive session for the configured city.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and default city.
    Configure,

    /// Look up one city and print the card.
    Show {
        /// City name, e.g. "London".
        city: String,
    },

    /// Type cities one per line; each line is looked up as soon as Enter is pressed.
    Interactive {
        /// City fetched on start; defaults to the configured city.
        city: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Some(Command::Configure) => configure(config),
            Some(Command::Show { city }) => {
                if let Some(key) = self.api_key {
                    config.set_api_key(key);
                }
                let provider = provider_from_config(&config)?;

                let mut controller = Controller::new(city);
                controller.submit(&provider).await;
                print!("{}", render(controller.state()));
                Ok(())
            }
            command => {
                if let Some(key) = self.api_key {
                    config.set_api_key(key);
                }
                let provider: Arc<dyn WeatherProvider> = Arc::new(provider_from_config(&config)?);

                let city = match command {
                    Some(Command::Interactive { city: Some(city) }) => city,
                    _ => config.default_query.clone(),
                };
                let input = BufReader::new(tokio::io::stdin());
                session::run(provider, city, input, &mut tokio::io::stdout()).await
            }
        }
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = inquire::Password::new("weatherapi.com API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let default_query = inquire::Text::new("Default city:")
        .with_default(&config.default_query)
        .prompt()
        .context("Failed to read default city")?;

    config.set_api_key(api_key);
    config.default_query = default_query;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}
