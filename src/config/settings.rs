//! User settings (`<data dir>/config.yml`).
//!
//! Every field is optional in the file. Precedence, highest first:
//! command-line flag, environment variable, settings file, built-in default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, ScaffoldorError};
use crate::scaffold::GitStrategy;

/// Published registry document.
pub const DEFAULT_REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/itstheanurag/scaffoldor/main/registry/registry.json";

/// Environment variable that overrides the registry URL.
pub const REGISTRY_URL_ENV: &str = "SCAFFOLDOR_REGISTRY_URL";

/// Persisted user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Remote registry document URL
    pub registry_url: String,

    /// HTTP timeout in seconds
    pub timeout: u64,

    /// Default git strategy offered when scaffolding
    pub git_strategy: GitStrategy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            timeout: 30,
            git_strategy: GitStrategy::Fresh,
        }
    }
}

impl Settings {
    /// Load settings from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&super::settings_path())
    }

    /// Load settings from a file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Self =
            serde_yaml::from_str(&content).map_err(|e| ScaffoldorError::ConfigParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Apply a registry URL override (flag or environment).
    pub fn with_registry_url(mut self, url: Option<&str>) -> Self {
        if let Some(url) = url.filter(|u| !u.is_empty()) {
            self.registry_url = url.to_string();
        }
        self
    }

    /// HTTP timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::load_from(&temp.path().join("config.yml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "git_strategy: keep\ntimeout: 5\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();

        assert_eq!(settings.git_strategy, GitStrategy::Keep);
        assert_eq!(settings.timeout, 5);
        assert_eq!(settings.registry_url, DEFAULT_REGISTRY_URL);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "git_strategy: [nope").unwrap();

        let err = Settings::load_from(&path).unwrap_err();

        assert!(matches!(err, ScaffoldorError::ConfigParseError { .. }));
    }

    #[test]
    fn unknown_strategy_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "git_strategy: squash\n").unwrap();

        assert!(Settings::load_from(&path).is_err());
    }

    #[test]
    fn override_wins_over_file() {
        let settings = Settings::default().with_registry_url(Some("http://localhost/r.json"));
        assert_eq!(settings.registry_url, "http://localhost/r.json");

        let unchanged = Settings::default().with_registry_url(None);
        assert_eq!(unchanged.registry_url, DEFAULT_REGISTRY_URL);
    }
}
