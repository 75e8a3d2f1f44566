mod types;

use std::fs;
use std::path::{Path, PathBuf};

pub use types::{Config, HistoryConfig, StorageConfig, SuggestionConfig};

const CONFIG_DIR: &str = "manasift";
const CONFIG_FILE: &str = "config.toml";

/// Loaded configuration plus a warning to surface when the file was unusable
#[derive(Debug)]
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

/// `~/.config/manasift`
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR))
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

pub fn load_config() -> ConfigResult {
    match config_path() {
        Some(path) => load_config_from_path(&path),
        None => ConfigResult {
            config: Config::default(),
            warning: None,
        },
    }
}

/// A missing file yields defaults silently; an invalid one yields defaults and a warning.
pub fn load_config_from_path(path: &Path) -> ConfigResult {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(_) => {
            return ConfigResult {
                config: Config::default(),
                warning: None,
            };
        }
    };

    match toml::from_str::<Config>(&contents) {
        Ok(config) => ConfigResult {
            config,
            warning: None,
        },
        Err(e) => ConfigResult {
            config: Config::default(),
            warning: Some(format!("Invalid config {}: {}", path.display(), e)),
        },
    }
}

impl StorageConfig {
    /// Directory holding persisted state.
    pub fn resolve_data_dir(&self) -> Option<PathBuf> {
        self.data_dir.clone().or_else(config_dir)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
