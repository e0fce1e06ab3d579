//! Configuration file.
//!
//! JSON at `<config dir>/usagepanel/config.json`. Every field is optional;
//! a missing file means defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use usagepanel_fetch::CredentialPaths;

/// Errors raised while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file is not valid configuration JSON.
    #[error("Invalid configuration in {path}: {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
}

// ============================================================================
// Config
// ============================================================================

/// Effective configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overlay settings.
    pub panel: PanelConfig,
    /// Network settings.
    pub fetch: FetchConfig,
    /// Credential store overrides.
    pub credentials: CredentialsConfig,
    /// Default log level for the `usagepanel` crates.
    pub log_level: String,
}

/// Overlay size and styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Nominal overlay width.
    pub width: usize,
    /// Narrowest overlay width, terminal permitting.
    pub min_width: usize,
    /// Whether to emit colors.
    pub colors: bool,
}

/// Network settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Overrides for the credential store locations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Primary store file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_file: Option<PathBuf>,
    /// Directory of the legacy Codex store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codex_home: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            panel: PanelConfig::default(),
            fetch: FetchConfig::default(),
            credentials: CredentialsConfig::default(),
            log_level: "warn".to_string(),
        }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width: 58,
            min_width: 44,
            colors: true,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout_secs: 15 }
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("usagepanel")
            .join("config.json")
    }

    /// Loads `explicit` if given, else the default path.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => Self::load_from(&Self::default_path()),
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Credential locations after applying overrides to the defaults.
    pub fn credential_paths(&self) -> CredentialPaths {
        let discovered = CredentialPaths::discover();
        CredentialPaths {
            auth_file: self
                .credentials
                .auth_file
                .clone()
                .or(discovered.auth_file),
            codex_home: self
                .credentials
                .codex_home
                .clone()
                .or(discovered.codex_home),
        }
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.fetch.timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.panel.width, 58);
        assert_eq!(config.panel.min_width, 44);
        assert_eq!(config.timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"panel": {"width": 70}, "log_level": "debug"}"#).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.panel.width, 70);
        assert_eq!(config.panel.min_width, 44);
        assert!(config.panel.colors);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.fetch.timeout_secs, 15);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.json"));
    }

    #[test]
    fn test_credential_overrides() {
        let config = Config {
            credentials: CredentialsConfig {
                auth_file: Some(PathBuf::from("/tmp/auth.json")),
                codex_home: Some(PathBuf::from("/tmp/codex")),
            },
            ..Config::default()
        };

        let paths = config.credential_paths();
        assert_eq!(paths.auth_file, Some(PathBuf::from("/tmp/auth.json")));
        assert_eq!(
            paths.codex_auth_file(),
            Some(PathBuf::from("/tmp/codex/auth.json"))
        );
    }

    #[test]
    fn test_zero_timeout_is_raised() {
        let mut config = Config::default();
        config.fetch.timeout_secs = 0;
        assert_eq!(config.timeout(), Duration::from_secs(1));
    }
}
