//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/mindtree/mindtree.toml`
//! 3. Environment variables: `MINDTREE_*` prefix

use std::path::PathBuf;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, ApplicationResult};

const APP_NAME: &str = "mindtree";
const SNAPSHOT_FILE: &str = "mindmap.json";

/// User-tunable settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Snapshot file location. Default: `<data_dir>/mindtree/mindmap.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,
}

impl Settings {
    /// Load settings with layered precedence.
    pub fn load() -> ApplicationResult<Self> {
        let mut builder = Config::builder();

        if let Some(path) = Self::config_file() {
            builder = builder.add_source(File::from(path).required(false));
        }
        builder = builder.add_source(Environment::with_prefix("MINDTREE"));

        builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ApplicationError::Config {
                message: e.to_string(),
            })
    }

    /// Path of the global config file, if a config dir can be determined.
    pub fn config_file() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME)
            .map(|dirs| dirs.config_dir().join(format!("{APP_NAME}.toml")))
    }

    /// Resolved snapshot file path: explicit setting wins, otherwise the
    /// platform data dir, otherwise the current directory.
    pub fn snapshot_file(&self) -> PathBuf {
        if let Some(path) = &self.snapshot_path {
            return path.clone();
        }
        match ProjectDirs::from("", "", APP_NAME) {
            Some(dirs) => dirs.data_dir().join(SNAPSHOT_FILE),
            None => PathBuf::from(SNAPSHOT_FILE),
        }
    }

    /// TOML template with current values, for `config init`.
    pub fn to_template(&self) -> ApplicationResult<String> {
        let body = toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })?;
        let mut rendered = String::from(
            "# mindtree configuration\n\
             # Unset values fall back to built-in defaults.\n\
             #\n\
             # snapshot_path = \"/path/to/mindmap.json\"\n\n",
        );
        rendered.push_str(&body);
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_file_prefers_explicit_setting() {
        let settings = Settings {
            snapshot_path: Some(PathBuf::from("/tmp/custom.json")),
            ..Default::default()
        };
        assert_eq!(settings.snapshot_file(), PathBuf::from("/tmp/custom.json"));
    }

    #[test]
    fn template_is_valid_toml() {
        let rendered = Settings::default().to_template().unwrap();
        let parsed: Result<Settings, _> = toml::from_str(
            rendered
                .lines()
                .filter(|l| !l.starts_with('#'))
                .collect::<Vec<_>>()
                .join("\n")
                .as_str(),
        );
        assert!(parsed.is_ok());
    }
}
