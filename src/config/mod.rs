//! Configuration loading and management.

mod config_data;
mod config_update;
mod resolution;

use std::fs;
use std::path::{Path, PathBuf};

pub use config_data::Config;
pub use config_update::ConfigUpdate;
pub use resolution::ResolutionPolicy;

use crate::errors::{Result, TangleError};

/// Configuration file names to search for.
const CONFIG_FILES: &[&str] = &["tangler.toml", ".tangler.toml"];

/// Finds the configuration file in the given directory or its parents.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for name in CONFIG_FILES {
            let candidate = current.join(name);
            if candidate.exists() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Reads configuration from a TOML file.
pub fn read_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        TangleError::Config(format!("cannot read {}: {}", path.display(), e))
    })?;
    let update: ConfigUpdate = toml::from_str(&content)?;
    tracing::debug!("Loaded configuration from {}", path.display());
    Ok(update.merge_into(&Config::default()))
}

/// Reads configuration, searching from the given directory.
///
/// If no config file is found, returns the default configuration.
pub fn read_config(start_dir: &Path) -> Result<Config> {
    match find_config_file(start_dir) {
        Some(path) => read_config_file(&path),
        None => Ok(Config::default()),
    }
}

/// Loads the configuration for a run in `base_dir`.
///
/// An explicit config path is resolved against `base_dir`; without one the
/// directory and its parents are searched.
pub fn load_config(base_dir: &Path, explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) if path.is_absolute() => read_config_file(path),
        Some(path) => read_config_file(&base_dir.join(path)),
        None => read_config(base_dir),
    }
}
