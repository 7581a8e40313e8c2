//! CLI configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/townboard/config.toml` by default. The only setting today is
//! the database path; the platform data directory is used when it is absent.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Configuration for the townboard CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Path to the events database.
    pub database: Option<PathBuf>,
}

impl CliConfig {
    /// Loads configuration from the default path, falling back to defaults
    /// when no file exists.
    pub fn load() -> CliResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        debug!(path = %path.display(), "loading configuration");
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("townboard")
            .join("config.toml")
    }

    /// Resolves the database path: explicit override first, then the config
    /// file, then the platform default.
    pub fn database_path(&self, override_path: Option<&Path>) -> PathBuf {
        if let Some(path) = override_path {
            return path.to_path_buf();
        }
        if let Some(path) = &self.database {
            return path.clone();
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("townboard")
            .join("events.db3")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_is_under_townboard() {
        let path = CliConfig::default_path();
        assert!(path.ends_with("townboard/config.toml"));
    }

    #[test]
    fn database_path_precedence() {
        let config = CliConfig {
            database: Some(PathBuf::from("/var/lib/townboard/events.db3")),
        };

        let flag = PathBuf::from("/tmp/override.db3");
        assert_eq!(config.database_path(Some(&flag)), flag);
        assert_eq!(
            config.database_path(None),
            PathBuf::from("/var/lib/townboard/events.db3")
        );

        let empty = CliConfig::default();
        assert!(empty.database_path(None).ends_with("townboard/events.db3"));
    }

    #[test]
    fn load_from_parses_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "database = \"/srv/events.db3\"\n").unwrap();

        let config = CliConfig::load_from(&path).unwrap();
        assert_eq!(config.database, Some(PathBuf::from("/srv/events.db3")));
    }

    #[test]
    fn load_from_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "database = [nonsense").unwrap();

        assert!(matches!(
            CliConfig::load_from(&path),
            Err(CliError::Config(_))
        ));
    }
}
