//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::fetch::RiotClientConfig;
use crate::models::Region;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Upstream API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiotConfig {
    /// API key; usually supplied through `RIOT_API_KEY` instead.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Timeout in seconds for data requests
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Timeout in seconds for the status probe
    #[serde(default = "default_status_timeout")]
    pub status_timeout_seconds: u64,

    #[serde(default = "default_region")]
    pub default_region: Region,

    /// Match ids listed when the caller gives no count
    #[serde(default = "default_match_count")]
    pub match_count: u32,

    /// Serve sample data only, never calling upstream
    #[serde(default)]
    pub use_mock_data: bool,

    /// Data Dragon version used when the live lookup fails
    #[serde(default = "default_ddragon_version")]
    pub ddragon_fallback_version: String,
}

fn default_timeout() -> u64 {
    10
}

fn default_status_timeout() -> u64 {
    5
}

fn default_region() -> Region {
    Region::Jp1
}

fn default_match_count() -> u32 {
    20
}

fn default_ddragon_version() -> String {
    "13.24.1".to_string()
}

impl Default for RiotConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            timeout_seconds: default_timeout(),
            status_timeout_seconds: default_status_timeout(),
            default_region: default_region(),
            match_count: default_match_count(),
            use_mock_data: false,
            ddragon_fallback_version: default_ddragon_version(),
        }
    }
}

impl RiotConfig {
    /// The configured key, if it is non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Client settings, or `None` when there is no key to authenticate with.
    pub fn client_config(&self) -> Option<RiotClientConfig> {
        let key = self.api_key()?;
        Some(RiotClientConfig {
            timeout: Duration::from_secs(self.timeout_seconds),
            status_timeout: Duration::from_secs(self.status_timeout_seconds),
            ..RiotClientConfig::new(key)
        })
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub riot: RiotConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            server: ServerConfig::default(),
            riot: RiotConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when it exists (defaults otherwise), then apply
    /// environment overrides and validate.
    pub fn load(path: Option<&PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) if p.exists() => Self::from_file(p)?,
            _ => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply `RIOT_API_KEY` and `USE_MOCK_DATA` from `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("RIOT_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.riot.api_key = Some(key);
        }
        if let Some(flag) = lookup("USE_MOCK_DATA") {
            self.riot.use_mock_data = matches!(flag.trim().to_lowercase().as_str(), "true" | "1");
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.riot.timeout_seconds == 0 || self.riot.status_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Riot API timeouts must be greater than 0".to_string(),
            ));
        }

        if !(1..=100).contains(&self.riot.match_count) {
            return Err(ConfigError::ValidationError(format!(
                "match_count must be between 1 and 100, got {}",
                self.riot.match_count
            )));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, "info");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.riot.default_region, Region::Jp1);
        assert_eq!(config.riot.match_count, 20);
        assert!(!config.riot.use_mock_data);
        assert_eq!(config.riot.ddragon_fallback_version, "13.24.1");
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_timeout() {
        let mut config = AppConfig::default();
        config.riot.timeout_seconds = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_match_count() {
        let mut config = AppConfig::default();
        config.riot.match_count = 101;
        assert!(config.validate().is_err());

        config.riot.match_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[riot]\ndefault_region = \"EUW1\"\nmatch_count = 5\n\n[server]\nport = 3000"
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.riot.default_region, Region::Euw1);
        assert_eq!(config.riot.match_count, 5);
        assert_eq!(config.riot.timeout_seconds, 10);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_file_with_unknown_region_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[riot]\ndefault_region = \"mars1\"").unwrap();

        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path)).is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> =
            HashMap::from([("RIOT_API_KEY", "RGAPI-1234"), ("USE_MOCK_DATA", "TRUE")]);
        let mut config = AppConfig::default();
        config.apply_env(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.riot.api_key(), Some("RGAPI-1234"));
        assert!(config.riot.use_mock_data);
    }

    #[test]
    fn test_blank_key_is_no_key() {
        let mut config = AppConfig::default();
        config.riot.api_key = Some("   ".to_string());
        assert_eq!(config.riot.api_key(), None);
        assert!(config.riot.client_config().is_none());

        config.riot.api_key = Some("RGAPI-x".to_string());
        let client = config.riot.client_config().unwrap();
        assert_eq!(client.timeout, Duration::from_secs(10));
        assert_eq!(client.status_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.riot.default_region, config.riot.default_region);
    }
}
