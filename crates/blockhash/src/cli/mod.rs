//! Command implementations.

pub mod config;
pub mod hash;

use blockhash_core::config::expand_path;
use blockhash_core::{Config, ConfigError};
use std::path::{Path, PathBuf};

/// The config file in effect: the explicit one, or the platform default.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(expand_path)
        .unwrap_or_else(Config::default_path)
}

/// Load the explicit config file, or the default one if it exists.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}
