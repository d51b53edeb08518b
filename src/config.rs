//! Token and account configuration
//!
//! The API token is read from a local TOML file, never from the command
//! line or process arguments where it would leak into shell history.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::ReportError;

/// Invest API credentials and report defaults
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Bearer token for the invest API
    pub token: String,

    /// Default account id; the first account of the token is used when absent
    #[serde(default)]
    pub account_id: Option<String>,
}

/// Get the default config path (~/.invest-report/config.toml)
pub fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".invest-report").join("config.toml"))
}

impl Config {
    /// Load the config from `path`, or from the default location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_path()?,
        };

        let raw = std::fs::read_to_string(&path).with_context(|| {
            format!(
                "Failed to read config at {:?}. Create it with a line: token = \"t.your_token\"",
                path
            )
        })?;

        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {:?}", path))?;

        if config.token.trim().is_empty() {
            return Err(ReportError::ConfigError(format!(
                "config at {:?} has an empty token",
                path
            ))
            .into());
        }

        Ok(config)
    }
}
