//! Configuration file loading for brewdoc.
//!
//! Discovers and loads `brewdoc.toml` from the working directory (or an explicit `--config` path).
//! Merges config file settings with CLI arguments and environment (CLI takes precedence).

use anyhow::Context;
use brewdoc_render::DEFAULT_SHARE_BASE_URL;
use brewdoc_source::SourceError;
use brewdoc_source::brewfather::{BrewfatherClient, Credentials, DEFAULT_BASE_URL};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "brewdoc.toml";

/// Top-level configuration from brewdoc.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BrewdocConfig {
    /// API access.
    pub brewfather: BrewfatherConfig,

    /// Document options.
    pub render: RenderConfig,
}

/// Brewfather section of the config.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct BrewfatherConfig {
    pub username: Option<String>,

    pub api_key: Option<String>,

    /// API root, without the trailing resource path.
    pub base_url: String,

    /// Prefix for public share links.
    pub share_base_url: String,

    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for BrewfatherConfig {
    fn default() -> Self {
        Self {
            username: None,
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            share_base_url: DEFAULT_SHARE_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl std::fmt::Debug for BrewfatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrewfatherConfig")
            .field("username", &self.username)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("share_base_url", &self.share_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Render section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Fetch and render brew-day notes from the recipe's batch.
    pub include_notes: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            include_notes: true,
        }
    }
}

/// Discover the brewdoc.toml config file in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a brewdoc.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<BrewdocConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<BrewdocConfig> {
    let config: BrewdocConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load the explicit config file if given, else discover one in `dir`, else defaults.
pub fn load_or_default(explicit: Option<&Utf8Path>, dir: &Utf8Path) -> anyhow::Result<BrewdocConfig> {
    match explicit {
        Some(path) => load_config(path),
        None => match discover_config(dir) {
            Some(path) => load_config(&path),
            None => Ok(BrewdocConfig::default()),
        },
    }
}

/// Values supplied on the command line or through the environment.
#[derive(Default)]
pub struct CliOverrides {
    pub username: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub no_notes: bool,
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Clone)]
pub struct MergedConfig {
    pub username: Option<String>,
    pub api_key: Option<String>,
    pub base_url: String,
    pub share_base_url: String,
    pub timeout: Duration,
    pub include_notes: bool,
}

impl MergedConfig {
    pub fn credentials(&self) -> Result<Credentials, SourceError> {
        Credentials::from_parts(self.username.clone(), self.api_key.clone())
    }

    /// API client; fails early when credentials are missing.
    pub fn client(&self) -> anyhow::Result<BrewfatherClient> {
        let credentials = self.credentials()?;
        let client = BrewfatherClient::new(&self.base_url, credentials, self.timeout)?;
        Ok(client)
    }
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: BrewdocConfig,
}

impl ConfigMerger {
    /// Create a new merger from a loaded config.
    pub fn new(config: BrewdocConfig) -> Self {
        Self { config }
    }

    /// CLI values replace config values when present; `--no-notes` always wins.
    pub fn merge(self, cli: CliOverrides) -> MergedConfig {
        let BrewdocConfig { brewfather, render } = self.config;
        let merged = MergedConfig {
            username: cli.username.or(brewfather.username),
            api_key: cli.api_key.or(brewfather.api_key),
            base_url: cli.base_url.unwrap_or(brewfather.base_url),
            share_base_url: brewfather.share_base_url,
            timeout: Duration::from_secs(brewfather.timeout_secs),
            include_notes: render.include_notes && !cli.no_notes,
        };
        debug!(
            base_url = %merged.base_url,
            has_username = merged.username.is_some(),
            has_api_key = merged.api_key.is_some(),
            include_notes = merged.include_notes,
            "merged config"
        );
        merged
    }
}
