//! Configuration Management
//!
//! Persistent configuration for the provider, and resolution of the
//! effective settings (flag or environment > config file > default).

use crate::launchdarkly::urls::DEFAULT_BASE_URL;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the access token
pub const ACCESS_TOKEN_ENV: &str = "LAUNCHDARKLY_ACCESS_TOKEN";
/// Environment variable overriding the API base URL
pub const BASE_URL_ENV: &str = "LAUNCHDARKLY_BASE_URL";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    /// Per-request timeout; unset means requests may block indefinitely
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Settings a provider instance is built from
#[derive(Clone, PartialEq)]
pub struct ProviderConfig {
    pub access_token: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("access_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("launchdarkly-provider").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config {}", path.display()))?;

        Ok(())
    }

    /// Resolve provider settings. `access_token` and `base_url` come from
    /// the command line or environment and win over the file.
    pub fn provider_config(
        &self,
        access_token: Option<String>,
        base_url: Option<String>,
    ) -> Result<ProviderConfig> {
        let access_token = non_blank(access_token)
            .or_else(|| non_blank(self.access_token.clone()))
            .with_context(|| {
                format!(
                    "No LaunchDarkly access token configured. Set {} or use --token",
                    ACCESS_TOKEN_ENV
                )
            })?;

        let base_url = base_url
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(ProviderConfig {
            access_token,
            base_url,
            timeout: self.timeout_secs.map(Duration::from_secs),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_file() {
        let config = Config {
            access_token: Some("file-token".to_string()),
            base_url: Some("http://file".to_string()),
            timeout_secs: Some(30),
        };

        let resolved = config
            .provider_config(Some("flag-token".to_string()), None)
            .unwrap();

        assert_eq!(resolved.access_token, "flag-token");
        assert_eq!(resolved.base_url, "http://file");
        assert_eq!(resolved.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn blank_flag_falls_back_to_file_token() {
        let config = Config {
            access_token: Some("file-token".to_string()),
            ..Default::default()
        };

        let resolved = config
            .provider_config(Some("   ".to_string()), None)
            .unwrap();
        assert_eq!(resolved.access_token, "file-token");

        let blank_everywhere = Config {
            access_token: Some(String::new()),
            ..Default::default()
        };
        assert!(blank_everywhere
            .provider_config(Some(String::new()), None)
            .is_err());
    }

    #[test]
    fn defaults_base_url() {
        let config = Config {
            access_token: Some("file-token".to_string()),
            ..Config::default()
        };

        let resolved = config.provider_config(None, None).unwrap();
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.timeout, None);
    }

    #[test]
    fn missing_token_is_an_error() {
        let err = Config::default()
            .provider_config(Some("  ".to_string()), None)
            .unwrap_err();
        assert!(err.to_string().contains(ACCESS_TOKEN_ENV));
    }

    #[test]
    fn debug_redacts_token() {
        let resolved = Config::default()
            .provider_config(Some("api-secret".to_string()), None)
            .unwrap();
        assert!(!format!("{:?}", resolved).contains("api-secret"));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launchdarkly-provider").join("config.json");
        let config = Config {
            access_token: Some("api-123".to_string()),
            base_url: None,
            timeout_secs: Some(10),
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn malformed_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        assert_eq!(Config::load_from(&path), Config::default());
    }
}
