//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Listing, filter and statistics panel behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Page size the backend paginates with
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_stats_poll")]
    pub stats_poll_secs: u64,

    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,
}

fn default_page_size() -> u32 {
    10
}

fn default_stats_poll() -> u64 {
    crate::stats::DEFAULT_POLL_INTERVAL.as_secs()
}

fn default_debounce() -> u64 {
    crate::debounce::DEFAULT_QUIET_PERIOD.as_millis() as u64
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            stats_poll_secs: default_stats_poll(),
            debounce_ms: default_debounce(),
        }
    }
}

impl UiConfig {
    pub fn stats_poll_interval(&self) -> Duration {
        Duration::from_secs(self.stats_poll_secs.max(1))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("filehub").join("config.toml")),
            Some(PathBuf::from("./filehub.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("FILEHUB_API_URL") {
            self.api.base_url = url;
        }
        if let Some(secs) = lookup("FILEHUB_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.api.timeout_secs = secs;
        }

        if let Some(size) = lookup("FILEHUB_PAGE_SIZE").and_then(|v| v.parse().ok()) {
            self.ui.page_size = size;
        }
        if let Some(secs) = lookup("FILEHUB_STATS_POLL_SECS").and_then(|v| v.parse().ok()) {
            self.ui.stats_poll_secs = secs;
        }
        if let Some(ms) = lookup("FILEHUB_DEBOUNCE_MS").and_then(|v| v.parse().ok()) {
            self.ui.debounce_ms = ms;
        }

        if let Some(level) = lookup("FILEHUB_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("FILEHUB_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# File Hub client configuration
#
# Environment variables override these settings:
# - FILEHUB_API_URL
# - FILEHUB_TIMEOUT_SECS
# - FILEHUB_PAGE_SIZE
# - FILEHUB_STATS_POLL_SECS
# - FILEHUB_DEBOUNCE_MS
# - FILEHUB_LOG_LEVEL
# - FILEHUB_LOG_FORMAT

[api]
# Base URL of the File Hub REST API
base_url = "http://localhost:8000/api"

# Request timeout in seconds
timeout_secs = 30

[ui]
# Page size the backend paginates listings with
page_size = 10

# How often `stats --watch` refreshes (seconds)
stats_poll_secs = 30

# Quiet period before filter changes are applied (milliseconds)
debounce_ms = 500

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.ui.page_size, 10);
        assert_eq!(config.ui.debounce(), Duration::from_millis(500));
        assert_eq!(config.ui.stats_poll_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"https://files.example.com/api\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://files.example.com/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url = ").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            Config::load(Path::new("/nonexistent/filehub.toml")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("FILEHUB_API_URL", "http://hub:9000/api"),
            ("FILEHUB_PAGE_SIZE", "25"),
            ("FILEHUB_DEBOUNCE_MS", "not-a-number"),
            ("FILEHUB_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://hub:9000/api");
        assert_eq!(config.ui.page_size, 25);
        assert_eq!(config.ui.debounce_ms, 500);
        assert_eq!(config.logging.format, "json");
    }
}
