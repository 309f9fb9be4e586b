//! Configuration types for the studybuild engine.
//!
//! This module defines the on-disk configuration schema and the API
//! credential. The credential is never serialized; it is resolved once at
//! startup and injected into the [`Config`] value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Environment variables consulted for the API key, in priority order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Default location of the config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = ".studybuild/config.json";

/// Main configuration for studybuild.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the generation API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds. `None` keeps the transport default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,

    /// TUI tick rate in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// API credential (runtime only).
    #[serde(skip)]
    pub api_key: Option<ApiKey>,
}

fn default_model() -> String {
    "gemini-2.5-flash".into()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}

fn default_tick_rate_ms() -> u64 {
    250
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Load configuration from a file, falling back to defaults if it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file. The API key is not written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Attach an API key.
    #[must_use]
    pub fn with_api_key(mut self, key: Option<ApiKey>) -> Self {
        self.api_key = key;
        self
    }

    /// Resolve the API key from the process environment.
    #[must_use]
    pub fn with_api_key_from_env(self) -> Self {
        let key = ApiKey::from_lookup(|name| std::env::var(name).ok());
        self.with_api_key(key)
    }

    /// Override the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            timeout_seconds: None,
            tick_rate_ms: default_tick_rate_ms(),
            api_key: None,
        }
    }
}

/// An API key. Its `Debug` output never shows the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key. Blank keys are treated as absent.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            None
        } else {
            Some(Self(key))
        }
    }

    /// Resolve a key by looking up [`API_KEY_ENV_VARS`] in order.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        API_KEY_ENV_VARS
            .iter()
            .find_map(|name| lookup(name).and_then(Self::new))
    }

    /// The raw secret, for use in request headers only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!(config.base_url.starts_with("https://"));
        assert_eq!(config.timeout_seconds, None);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"timeout_seconds": 30}"#).unwrap();
        assert_eq!(config.timeout_seconds, Some(30));
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.tick_rate_ms, 250);
    }

    #[test]
    fn test_save_never_writes_api_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config::default().with_api_key(ApiKey::new("secret-value"));
        config.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("secret-value"));

        let loaded = Config::load(&path).unwrap();
        assert!(loaded.api_key.is_none());
        assert_eq!(loaded.model, config.model);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config.model, Config::default().model);
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_api_key_lookup_order() {
        let key = ApiKey::from_lookup(|name| match name {
            "GEMINI_API_KEY" => Some("primary".into()),
            "API_KEY" => Some("fallback".into()),
            _ => None,
        });
        assert_eq!(key.unwrap().expose(), "primary");

        let key = ApiKey::from_lookup(|name| match name {
            "GEMINI_API_KEY" => Some("  ".into()),
            "API_KEY" => Some("fallback".into()),
            _ => None,
        });
        assert_eq!(key.unwrap().expose(), "fallback");

        assert!(ApiKey::from_lookup(|_| None).is_none());
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let config = Config::default().with_api_key(ApiKey::new("hunter2"));
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("ApiKey(***)"));
    }
}
