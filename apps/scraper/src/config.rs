//! Loading the scrape configuration from an optional TOML file.

use cgw_core::ScrapeConfig;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Built-in defaults, overridden by whatever keys the file at `path` sets.
pub fn load_config(path: Option<&Path>) -> Result<ScrapeConfig, ConfigError> {
    match path {
        Some(path) => {
            let contents = fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        }
        None => Ok(ScrapeConfig::default()),
    }
}
