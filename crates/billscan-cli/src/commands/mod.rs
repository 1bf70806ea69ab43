//! CLI subcommands.

pub mod config;
pub mod parse;
pub mod suppliers;

use std::path::{Path, PathBuf};

use billscan_core::{AppConfig, ConfigError};
use tracing::debug;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("billscan")
        .join("config.json")
}

/// Load the configuration.
///
/// An explicit path must be readable. Without one the default location is used when present,
/// otherwise the built-in defaults apply.
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    match config_path {
        Some(path) => AppConfig::from_file(Path::new(path)),
        None => {
            let path = default_config_path();
            if path.exists() {
                debug!("Using configuration at {}", path.display());
                AppConfig::from_file(&path)
            } else {
                Ok(AppConfig::default())
            }
        }
    }
}
