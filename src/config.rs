//! Tool configuration.
//!
//! Settings come from an optional TOML file, then the environment, then
//! command-line flags, each layer overriding the one before.
//!
//! ```toml
//! data_path = "data/skyrim.json"
//! format = "json"
//! log_filter = "alchemist=debug"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable overriding [`ToolConfig::data_path`].
pub const DATA_ENV_VAR: &str = "ALCHEMIST_DATA";

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Aligned plain-text columns.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Settings for the command-line tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Ingredient table (JSON).
    pub data_path: PathBuf,
    /// Output format.
    pub format: OutputFormat,
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data.json"),
            format: OutputFormat::Table,
            log_filter: "info".to_string(),
        }
    }
}

impl ToolConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Loads the config file at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Replaces the data path, unless `data_path` is `None` or empty.
    #[must_use]
    pub fn with_data_override(mut self, data_path: Option<PathBuf>) -> Self {
        if let Some(path) = data_path.filter(|p| !p.as_os_str().is_empty()) {
            self.data_path = path;
        }
        self
    }

    /// Applies [`DATA_ENV_VAR`] from the process environment.
    #[must_use]
    pub fn with_env(self) -> Self {
        let from_env = std::env::var_os(DATA_ENV_VAR).map(PathBuf::from);
        self.with_data_override(from_env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ToolConfig::default();
        assert_eq!(config.data_path, PathBuf::from("data.json"));
        assert_eq!(config.format, OutputFormat::Table);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ToolConfig::from_toml_str("format = \"json\"").unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.data_path, PathBuf::from("data.json"));
    }

    #[test]
    fn test_full_toml() {
        let config = ToolConfig::from_toml_str(
            r#"
            data_path = "data/skyrim.json"
            format = "table"
            log_filter = "alchemist=debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("data/skyrim.json"));
        assert_eq!(config.log_filter, "alchemist=debug");
    }

    #[test]
    fn test_malformed_toml() {
        let err = ToolConfig::from_toml_str("format = \"xml\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ToolConfig::load(&dir.path().join("alchemist.toml")).unwrap();
        assert_eq!(config, ToolConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alchemist.toml");
        std::fs::write(&path, "data_path = \"elsewhere.json\"\n").unwrap();
        let config = ToolConfig::load(&path).unwrap();
        assert_eq!(config.data_path, PathBuf::from("elsewhere.json"));
    }

    #[test]
    fn test_env_overrides_file_and_flag_overrides_env() {
        // The only test touching this variable.
        std::env::set_var(DATA_ENV_VAR, "from-env.json");
        let from_file = ToolConfig::from_toml_str("data_path = \"from-file.json\"").unwrap();

        let config = from_file.clone().with_env();
        assert_eq!(config.data_path, PathBuf::from("from-env.json"));

        let config = from_file
            .clone()
            .with_env()
            .with_data_override(Some(PathBuf::from("from-flag.json")));
        assert_eq!(config.data_path, PathBuf::from("from-flag.json"));

        std::env::set_var(DATA_ENV_VAR, "");
        assert_eq!(from_file.clone().with_env().data_path, PathBuf::from("from-file.json"));

        std::env::remove_var(DATA_ENV_VAR);
        assert_eq!(from_file.with_env().data_path, PathBuf::from("from-file.json"));
    }

    #[test]
    fn test_data_override() {
        let config = ToolConfig::default().with_data_override(Some(PathBuf::from("env.json")));
        assert_eq!(config.data_path, PathBuf::from("env.json"));

        let config = ToolConfig::default().with_data_override(Some(PathBuf::new()));
        assert_eq!(config.data_path, PathBuf::from("data.json"));

        let config = ToolConfig::default().with_data_override(None);
        assert_eq!(config.data_path, PathBuf::from("data.json"));
    }
}
