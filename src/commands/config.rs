//! Config subcommands handler

use anyhow::Result;
use std::path::Path;

use imgwarm::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Print the config file path.
#[cfg(not(tarpaulin_include))]
pub fn handle_path(config_path: Option<&Path>) -> Result<()> {
    println!("{}", super::config_file(config_path)?.display());
    Ok(())
}

/// Write the default configuration unless a config file already exists.
#[cfg(not(tarpaulin_include))]
pub fn handle_init(config_path: Option<&Path>) -> Result<()> {
    let path = super::config_file(config_path)?;
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }

    Config::default().save_to(&path)?;
    println!("Wrote default config: {}", path.display());
    Ok(())
}
