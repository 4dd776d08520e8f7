use std::num::NonZeroU32;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use inquire::Text;
use marsweather_core::{Config, MaasClient, MarsWeatherSource};
use serde::Serialize;
use tracing::debug;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "marsweather", version, about = "Mars weather from the MAAS API")]
pub struct Cli {
    /// Print the decoded response as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the most recent report.
    Latest,

    /// Show one page of the archive.
    Archive {
        /// Page number, starting at 1.
        page: NonZeroU32,
    },

    /// Show archived reports between two dates (YYYY-MM-DD).
    Range { from: NaiveDate, to: NaiveDate },

    /// Interactively set base URL, timeout and proxy.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        if let Command::Configure = self.command {
            return configure();
        }

        let config = Config::load()?;
        debug!(base_url = %config.base_url, "Loaded configuration");

        let client = MaasClient::from_config(&config).context("Failed to set up HTTP client")?;
        let output = execute(&client, &self.command, self.json).await?;
        print!("{output}");

        Ok(())
    }
}

/// Run a query command against `source` and format its result.
pub async fn execute(source: &dyn MarsWeatherSource, command: &Command, json: bool) -> Result<String> {
    match command {
        Command::Latest => {
            let latest = source.latest().await.context("Failed to fetch the latest report")?;
            output(&latest, json, render::latest)
        }
        Command::Archive { page } => {
            let archive = source
                .archive_page(*page)
                .await
                .with_context(|| format!("Failed to fetch archive page {page}"))?;
            output(&archive, json, |p| render::archive(&format!("Archive page {page}"), p))
        }
        Command::Range { from, to } => {
            let archive = source
                .archive_range(*from, *to)
                .await
                .with_context(|| format!("Failed to fetch archive from {from} to {to}"))?;
            output(&archive, json, |p| render::archive(&format!("Archive {from} .. {to}"), p))
        }
        Command::Configure => anyhow::bail!("configure is not a query command"),
    }
}

fn output<T: Serialize>(value: &T, json: bool, text: impl FnOnce(&T) -> String) -> Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(value).context("Failed to encode JSON")?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(text(value))
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let base_url = config.base_url.clone();
    config.base_url = Text::new("Base URL:")
        .with_default(&base_url)
        .prompt()
        .context("Failed to read base URL")?;

    let timeout = config.timeout_secs.map(|t| t.to_string()).unwrap_or_default();
    let timeout = Text::new("Timeout in seconds (empty for none):")
        .with_default(&timeout)
        .prompt()
        .context("Failed to read timeout")?;
    config.timeout_secs = optional(&timeout)
        .map(|t| t.parse::<u64>())
        .transpose()
        .with_context(|| format!("Invalid timeout '{timeout}'"))?;

    let proxy = config.proxy.clone().unwrap_or_default();
    let proxy = Text::new("Proxy URL (empty for none):")
        .with_default(&proxy)
        .prompt()
        .context("Failed to read proxy")?;
    config.proxy = optional(&proxy).map(str::to_string);

    // Fail now rather than on the next query.
    config.http_client().context("Configuration does not produce a usable HTTP client")?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

fn optional(answer: &str) -> Option<&str> {
    Some(answer.trim()).filter(|a| !a.is_empty())
}
