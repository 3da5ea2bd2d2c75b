use anyhow::Context;
use cep_weather_core::{Config, WeatherLookup, config::DEFAULT_CONTACT};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use std::path::{Path, PathBuf};

use crate::app;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cep-weather", version, about = "Current weather for a Brazilian postal code (CEP)")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Defaults to `serve` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP service.
    Serve {
        /// Address to bind, overrides the config file.
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on, overrides the config file.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Look up a single CEP and print the result as JSON.
    Lookup {
        /// Postal code, passed verbatim to the address service.
        cep: String,
    },

    /// Interactively set the Nominatim contact address and listening port.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let Cli { config: config_path, command } = self;
        let mut config = load_config(config_path.as_deref())?;

        match command.unwrap_or(Command::Serve { host: None, port: None }) {
            Command::Serve { host, port } => {
                if let Some(host) = host {
                    config.server.host = host;
                }
                if let Some(port) = port {
                    config.server.port = port;
                }

                let lookup = WeatherLookup::from_config(&config.upstream)?;
                app::serve(&config.server, lookup).await
            }
            Command::Lookup { cep } => {
                let lookup = WeatherLookup::from_config(&config.upstream)?;
                let result = lookup.lookup(&cep).await?;

                let json = serde_json::to_string_pretty(&result)
                    .context("Failed to serialize lookup result")?;
                println!("{json}");
                Ok(())
            }
            Command::Configure => configure(config, config_path.as_deref()),
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn configure(mut config: Config, path: Option<&Path>) -> anyhow::Result<()> {
    let contact = Text::new("Contact e-mail sent to Nominatim in the User-Agent:")
        .with_default(DEFAULT_CONTACT)
        .with_help_message("Required by the OpenStreetMap Nominatim usage policy")
        .prompt()?;

    let port = CustomType::<u16>::new("Port to listen on:")
        .with_default(config.server.port)
        .with_error_message("Please enter a valid port number")
        .prompt()?;

    config.set_contact(&contact);
    config.server.port = port;

    let saved_to = match path {
        Some(path) => {
            config.save_to(path)?;
            path.to_path_buf()
        }
        None => config.save()?,
    };

    println!("Configuration saved to {}", saved_to.display());
    Ok(())
}
