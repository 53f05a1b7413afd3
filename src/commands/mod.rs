//! Command handlers for the imgwarm CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod completions;
pub mod config;
pub mod fetch;
pub mod warm;

use anyhow::Result;
use std::path::{Path, PathBuf};

use imgwarm::Config;

/// Resolve the config file: the `--config` path if given, else the default location.
pub fn config_file(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::config_path(),
    }
}

/// Load configuration, falling back to defaults when the file is missing.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}
