//! `AppConfig` struct and TOML loading.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TVRage API client settings.
    #[serde(default)]
    pub api: ApiConfig,
}

/// TVRage API client configuration.
///
/// Every field is optional; unset fields keep the client defaults.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// Feeds base URL (e.g. a mirror of `http://services.tvrage.com/feeds/`).
    pub base_url: Option<String>,
    /// User-Agent header sent with every request.
    pub user_agent: Option<String>,
    /// Retries after a failed request.
    pub max_retries: Option<u32>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.api.base_url, None);
        assert_eq!(config.api.max_retries, None);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_full_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[api]
base_url = "http://localhost:8080/feeds/"
user_agent = "tvrage-test/1.0"
max_retries = 1
timeout_secs = 5
"#,
        )
        .unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(
            config.api,
            ApiConfig {
                base_url: Some(String::from("http://localhost:8080/feeds/")),
                user_agent: Some(String::from("tvrage-test/1.0")),
                max_retries: Some(1),
                timeout_secs: Some(5),
            }
        );
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nmax_retries = 0\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.api.max_retries, Some(0));
        assert_eq!(config.api.user_agent, None);
    }

    #[test]
    fn test_load_empty_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_invalid_toml() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nmax_retries = \"many\"\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("failed to parse"));
    }
}
