//! Execution context for tangle runs.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::errors::Result;

/// Context for tangle operations.
///
/// Holds the effective configuration and the directory that relative paths
/// are resolved against.
#[derive(Debug, Clone)]
pub struct Context {
    /// Configuration.
    pub config: Config,
    /// Base directory for operations.
    pub base_dir: PathBuf,
}

impl Context {
    /// Creates a new context with the given configuration.
    pub fn new(config: Config, base_dir: PathBuf) -> Self {
        Self { config, base_dir }
    }

    /// Creates a context with default configuration.
    pub fn default_for_dir(base_dir: PathBuf) -> Self {
        Self::new(Config::default(), base_dir)
    }

    /// Creates a context from the current directory, reading any config
    /// file found there or in a parent.
    pub fn from_current_dir() -> Result<Self> {
        let base_dir = std::env::current_dir()?;
        let config = crate::config::read_config(&base_dir)?;
        Ok(Self::new(config, base_dir))
    }

    /// Resolves a path relative to the base directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Resolves a chunk's `out` path, honoring `output_dir`.
    pub fn resolve_output_path(&self, path: &Path) -> PathBuf {
        match &self.config.output_dir {
            Some(dir) if !path.is_absolute() => self.resolve_path(&dir.join(path)),
            _ => self.resolve_path(path),
        }
    }
}
