//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the shoresquad.toml file.
//! It provides a centralized way to configure the weather endpoints, station
//! preference and display timings.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "shoresquad.toml";

/// Application configuration loaded from shoresquad.toml
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Weather source configuration
    pub weather: WeatherConfig,
    /// Display and UI configuration
    pub display: DisplayConfig,
}

/// Upstream weather source configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeatherConfig {
    /// Multi-day forecast endpoint (primary source)
    pub forecast_url: String,
    /// Current air temperature endpoint (fallback source)
    pub reading_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Station ids tried in order when picking the fallback reading
    pub preferred_stations: Vec<String>,
    /// Provider name credited on the error card
    pub provider_name: String,
}

/// Display and visualization configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// chrono format string for forecast day labels
    pub date_format: String,
    /// How long a toast stays visible, in milliseconds
    pub toast_duration_ms: u64,
    /// Seconds between opacity pulses on the weather grid
    pub pulse_interval_secs: u64,
    /// How long the grid stays dimmed during a pulse, in milliseconds
    pub pulse_dim_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            weather: WeatherConfig {
                forecast_url: "https://api.data.gov.sg/v1/environment/4-day-weather-forecast"
                    .to_string(),
                reading_url: "https://api.data.gov.sg/v1/environment/air-temperature".to_string(),
                timeout_secs: 10,
                user_agent: "shoresquad-weather".to_string(),
                preferred_stations: vec!["S109".to_string(), "S81".to_string()],
                provider_name: "NEA Singapore".to_string(),
            },
            display: DisplayConfig {
                date_format: "%a, %b %-d".to_string(),
                toast_duration_ms: 3000,
                pulse_interval_secs: 30,
                pulse_dim_ms: 500,
            },
        }
    }
}

impl Config {
    /// Load configuration from shoresquad.toml file
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!(path = %path.display(), "loaded configuration");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "invalid config file, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                info!(path = %path.display(), "no config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Save current configuration as pretty TOML
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;
        info!(path = %path.as_ref().display(), "configuration saved");
        Ok(())
    }
}
