//! Configuration data structures.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::resolution::ResolutionPolicy;
use crate::model::ROOT_CHUNK;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// How in-place references to multiply-defined names are resolved.
    #[serde(default)]
    pub resolution: ResolutionPolicy,

    /// Directory that relative `out` paths are resolved against.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Name of the chunk emitted when no chunk is requested.
    #[serde(default = "default_root_chunk")]
    pub root_chunk: String,

    /// Append a final newline to outputs that lack one.
    #[serde(default = "default_true")]
    pub trailing_newline: bool,

    /// Create missing parent directories of `out` paths.
    #[serde(default = "default_true")]
    pub create_dirs: bool,
}

fn default_root_chunk() -> String {
    ROOT_CHUNK.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolution: ResolutionPolicy::default(),
            output_dir: None,
            root_chunk: default_root_chunk(),
            trailing_newline: true,
            create_dirs: true,
        }
    }
}

impl Config {
    /// Returns `content` with the configured final newline applied.
    pub fn finish_output(&self, mut content: String) -> String {
        if self.trailing_newline && !content.ends_with('\n') {
            content.push('\n');
        }
        content
    }
}
