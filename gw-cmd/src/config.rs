//! Application configuration.
//!
//! ## Loading Order
//!
//! 1. An explicit `--config` path (errors are fatal)
//! 2. `GW_CONFIG` environment variable (path to TOML file)
//! 3. `groundwater.toml` in the current working directory
//! 4. Built-in defaults
//!
//! Every section and key is optional; missing ones take their defaults.
//!
//! ```toml
//! [stats]
//! forecast_years = 5
//! baseline_years = 10.0
//! coordinate_precision = 6
//!
//! [stats.severity]
//! critical_pct_drop = 20.0
//! critical_slope = -0.5
//! warning_pct_drop = 10.0
//! warning_slope = -0.1
//!
//! [prediction]
//! endpoints = ["http://localhost:8000"]
//! timeout_secs = 10
//! max_tries = 3
//! retry_delay_ms = 1000
//!
//! [history]
//! path = "prediction_history.json"
//! capacity = 100
//! ```

use anyhow::Context;
use gw_wells::{
    config::StatsConfig, history::DEFAULT_HISTORY_CAPACITY, prediction::PredictionConfig,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "GW_CONFIG";

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "groundwater.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub path: PathBuf,
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig {
            path: PathBuf::from("prediction_history.json"),
            capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub stats: StatsConfig,
    pub prediction: PredictionConfig,
    pub history: HistoryConfig,
}

impl AppConfig {
    /// Load configuration following the search order above.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            let config = Self::load_from_file(path)?;
            info!("Loaded config from {}", path.display());
            return Ok(config);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!("Loaded config from {}={}", CONFIG_ENV_VAR, path);
                        return Ok(config);
                    }
                    Err(e) => warn!(
                        "Failed to load config from {}: {:#}, falling back",
                        CONFIG_ENV_VAR, e
                    ),
                }
            } else {
                warn!(
                    "{} points to non-existent file {}, falling back",
                    CONFIG_ENV_VAR, path
                );
            }
        }

        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./{}", DEFAULT_CONFIG_FILE);
                    return Ok(config);
                }
                Err(e) => warn!(
                    "Failed to load ./{}: {:#}, using defaults",
                    DEFAULT_CONFIG_FILE, e
                ),
            }
        }

        info!("No config file found, using built-in defaults");
        Ok(Self::default())
    }

    /// Load and validate a specific TOML file.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.stats.validate()?;
        if self.history.capacity == 0 {
            anyhow::bail!("history.capacity must be at least 1");
        }
        if self.prediction.timeout_secs == 0 {
            anyhow::bail!("prediction.timeout_secs must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.stats.forecast_years, 5);
        assert_eq!(config.history.capacity, 100);
        assert_eq!(config.prediction.endpoints.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let file = write_config(
            r#"
[stats]
forecast_years = 3

[stats.severity]
critical_slope = -1.0

[prediction]
endpoints = ["http://wells.example:8000"]

[history]
capacity = 20
"#,
        );
        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.stats.forecast_years, 3);
        assert_eq!(config.stats.baseline_years, 10.0);
        assert_eq!(config.stats.severity.critical_slope, -1.0);
        assert_eq!(config.stats.severity.warning_slope, -0.1);
        assert_eq!(config.prediction.endpoints, vec!["http://wells.example:8000"]);
        assert_eq!(config.prediction.max_tries, 3);
        assert_eq!(config.history.capacity, 20);
        assert_eq!(config.history.path, PathBuf::from("prediction_history.json"));
    }

    #[test]
    fn test_load_empty_file_is_default() {
        let file = write_config("");
        let config = AppConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_explicit_path_errors_are_fatal() {
        let file = write_config("[stats\nforecast_years = ");
        assert!(AppConfig::load(Some(file.path())).is_err());
        assert!(AppConfig::load(Some(Path::new("/definitely/not/here.toml"))).is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let file = write_config("[history]\ncapacity = 0\n");
        assert!(AppConfig::load_from_file(file.path()).is_err());

        let file = write_config("[stats.severity]\nwarning_pct_drop = 50.0\n");
        assert!(AppConfig::load_from_file(file.path()).is_err());
    }
}
