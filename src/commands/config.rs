//! Config subcommands handler

use anyhow::{bail, Context, Result};
use std::path::Path;

use swimtally::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    print!("{}", render_config(&config)?);
    Ok(())
}

/// Print where the config file lives, whether or not it exists.
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

/// Write a config file holding the defaults.
#[cfg(not(tarpaulin_include))]
pub fn handle_init(force: bool) -> Result<()> {
    let config_path = Config::config_path()?;
    init_at(&config_path, force)?;
    println!("Wrote default config to {}", config_path.display());
    Ok(())
}

pub(crate) fn render_config(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize config")
}

pub(crate) fn init_at(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            config_path.display()
        );
    }
    Config::default().save_to(config_path)
}
