//! Configuration management for swimtally

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::report::OutputFormat;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Report rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    /// Pool length in metres, used for the informative total check
    #[serde(default = "default_pool_length")]
    pub pool_length: u32,
    /// Decimal places shown for distances (the parser never rounds)
    #[serde(default)]
    pub decimals: usize,
    /// Output format when --format is not given
    #[serde(default)]
    pub format: OutputFormat,
    /// Always include the per-line audit
    #[serde(default)]
    pub show_lines: bool,
}

fn default_pool_length() -> u32 {
    25
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            pool_length: default_pool_length(),
            decimals: 0,
            format: OutputFormat::default(),
            show_lines: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    /// Default tracing filter, overridden by SWIMTALLY_LOG and -v
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Largest supported `report.decimals`.
pub const MAX_DECIMALS: usize = 3;

impl Config {
    /// Get the config file path (~/.config/swimtally/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join("config.toml"))
    }

    /// Get the config directory path (~/.config/swimtally)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("swimtally"))
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file, or defaults if it is missing
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
            config
                .validate()
                .with_context(|| format!("Invalid config: {:?}", config_path))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    /// Reject values the report layer cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.report.pool_length == 0 {
            bail!("report.pool_length must be greater than 0");
        }
        if self.report.decimals > MAX_DECIMALS {
            bail!(
                "report.decimals must be at most {}, got {}",
                MAX_DECIMALS,
                self.report.decimals
            );
        }
        Ok(())
    }
}
