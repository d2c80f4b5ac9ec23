//! # Configuration Management Module
//!
//! TOML-backed configuration for the floobot daemon. Three sections:
//!
//! - [`WorldConfig`] - where the offline world seed lives
//! - [`NetworkConfig`] - fireplace network tuning (region name, timing windows)
//! - [`LoggingConfig`] - log level and optional log file
//!
//! Every field has a serde default so a partial `config.toml` stays valid,
//! and [`Config::default`] produces the exact file `floobot init` writes.
//! The timing values are gameplay constants: changing them changes the
//! debounce and idle behavior of every fireplace in the network.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::floo::types::DEFAULT_REGION_NAME;

/// Offline world settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// JSON world seed loaded when no platform connector is available.
    #[serde(default = "default_seed_file")]
    pub seed_file: String,
}

fn default_seed_file() -> String {
    "data/world.json".to_string()
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed_file: default_seed_file(),
        }
    }
}

/// Fireplace network tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Reserved private-area name mirroring lit fireplaces. Tiles of every
    /// other region are never touched.
    #[serde(default = "default_region_name")]
    pub region_name: String,
    /// Minimum gap between teleports through the same fireplace (ms).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Inactivity after which a lit fireplace self-extinguishes (seconds).
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    /// How often the idle sweeper visits every map (seconds).
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
    /// Maximum tiles probed when looking for a landing spot.
    #[serde(default = "default_landing_scan_budget")]
    pub landing_scan_budget: u32,
}

fn default_region_name() -> String {
    DEFAULT_REGION_NAME.to_string()
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_idle_timeout_secs() -> u64 {
    10
}

fn default_sweep_interval_secs() -> u64 {
    1
}

fn default_landing_scan_budget() -> u32 {
    1000
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            region_name: default_region_name(),
            debounce_ms: default_debounce_ms(),
            idle_timeout_secs: default_idle_timeout_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
            landing_scan_budget: default_landing_scan_budget(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: Some("floobot.log".to_string()),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}
