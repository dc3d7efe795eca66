use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// How often the demo binary logs a dashboard summary, in seconds.
    #[serde(default = "default_summary_secs")]
    pub summary_interval_secs: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_summary_secs() -> u64 {
    20
}

/// Synthetic event generator configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneratorConfig {
    /// Tick interval in seconds
    #[serde(default = "default_tick_secs")]
    pub tick_secs: u64,
    /// Chance in 0..=1 that a tick produces an alert
    #[serde(default = "default_probability")]
    pub probability: f64,
}

fn default_tick_secs() -> u64 {
    5
}

fn default_probability() -> f64 {
    0.35
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            tick_secs: default_tick_secs(),
            probability: default_probability(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            generator: GeneratorConfig::default(),
            summary_interval_secs: default_summary_secs(),
        }
    }
}

/// Load configuration from a TOML or JSON file, falling back to defaults
/// when no path is given.
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(path) => {
            let config_str = std::fs::read_to_string(path)
                .context(format!("Failed to read config file: {:?}", path))?;

            let config = if path.extension().map_or(false, |ext| ext == "json") {
                serde_json::from_str(&config_str).context("Failed to parse JSON config")?
            } else if path.extension().map_or(false, |ext| ext == "toml") {
                toml::from_str(&config_str).context("Failed to parse TOML config")?
            } else {
                return Err(anyhow::anyhow!("Unsupported config file format"));
            };

            Ok(config)
        }
        None => Ok(Config::default()),
    }
}
