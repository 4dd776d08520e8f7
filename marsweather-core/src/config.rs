use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use reqwest::{Client, Proxy};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::{endpoint::DEFAULT_BASE_URL, error::Error};

/// Transport settings stored on disk.
///
/// Example TOML:
/// ```toml
/// base_url = "http://marsweather.ingenology.com"
/// timeout_secs = 10
/// proxy = "http://proxy.local:3128"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout; `None` leaves the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub proxy: Option<String>,

    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self { base_url: default_base_url(), timeout_secs: None, proxy: None, user_agent: None }
    }
}

impl Config {
    /// Build a `reqwest::Client` carrying these settings.
    pub fn http_client(&self) -> std::result::Result<Client, Error> {
        let mut builder = Client::builder();

        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        if let Some(url) = &self.proxy {
            let proxy = Proxy::all(url.as_str())
                .map_err(|source| Error::InvalidProxy { url: url.clone(), source })?;
            builder = builder.proxy(proxy);
        }

        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.as_str());
        }

        builder.build().map_err(Error::ClientBuild)
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml = self.to_toml()?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid marsweather configuration")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "marsweather", "marsweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
