//! Partial configuration and merging.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::config_data::Config;
use super::resolution::ResolutionPolicy;

/// Partial configuration that can be merged into a [`Config`].
///
/// Only the fields that are set override the base.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub resolution: Option<ResolutionPolicy>,

    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    #[serde(default)]
    pub root_chunk: Option<String>,

    #[serde(default)]
    pub trailing_newline: Option<bool>,

    #[serde(default)]
    pub create_dirs: Option<bool>,
}

impl ConfigUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges this update into `base`, returning a new Config.
    pub fn merge_into(self, base: &Config) -> Config {
        Config {
            resolution: self.resolution.unwrap_or(base.resolution),
            output_dir: self.output_dir.or_else(|| base.output_dir.clone()),
            root_chunk: self.root_chunk.unwrap_or_else(|| base.root_chunk.clone()),
            trailing_newline: self.trailing_newline.unwrap_or(base.trailing_newline),
            create_dirs: self.create_dirs.unwrap_or(base.create_dirs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_update_keeps_base() {
        let base = Config::default();
        assert_eq!(ConfigUpdate::new().merge_into(&base), base);
    }

    #[test]
    fn test_update_overrides() {
        let update: ConfigUpdate = toml::from_str(
            r#"
resolution = "first-definition"
output_dir = "build"
trailing_newline = false
"#,
        )
        .unwrap();
        let config = update.merge_into(&Config::default());

        assert_eq!(config.resolution, ResolutionPolicy::FirstDefinition);
        assert_eq!(config.output_dir, Some(PathBuf::from("build")));
        assert!(!config.trailing_newline);
        assert!(config.create_dirs);
        assert_eq!(config.root_chunk, "*");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<ConfigUpdate, _> = toml::from_str("annotation = \"naked\"");
        assert!(result.is_err());
    }
}
