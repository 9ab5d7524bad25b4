//! Configuration loading
//!
//! Settings sources, highest priority first:
//!
//! 1. Command-line arguments
//! 2. Environment variables (`PICKUP_*`, read by the binary's clap parser)
//! 3. TOML configuration file
//! 4. Built-in defaults
//!
//! A missing config file is not an error: defaults are used and a warning is
//! logged. A config file that exists but cannot be parsed is an error.
//!
//! Loading runs before the tracing subscriber exists (the file may set the
//! log level), so [`TomlConfig::load`] reports a [`ConfigOrigin`] that the
//! caller logs once logging is up.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Configuration loaded from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub mpd: MpdConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Music daemon connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MpdConfig {
    /// host:port of the daemon
    #[serde(default = "default_mpd_address")]
    pub address: String,

    #[serde(default)]
    pub password: Option<String>,

    /// Connect/read timeout for one fetch, must be non-zero
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MpdConfig {
    fn default() -> Self {
        Self {
            address: default_mpd_address(),
            password: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl MpdConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Seconds between background refreshes, 0 disables
    #[serde(default)]
    pub refresh_interval_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            refresh_interval_secs: 0,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_mpd_address() -> String {
    "localhost:6600".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    Defaults,
}

impl ConfigOrigin {
    /// Log the outcome; call after the subscriber is installed.
    pub fn log(&self) {
        match self {
            ConfigOrigin::File(path) => info!("Loaded configuration from {}", path.display()),
            ConfigOrigin::Defaults => warn!("No config file found, using defaults"),
        }
    }
}

/// Command-line (and environment) overrides
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub mpd_address: Option<String>,
    pub mpd_password: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.mpd.timeout_secs == 0 {
            return Err(Error::Config("mpd.timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Load from an explicit path, or from the default locations.
    ///
    /// An explicit path that does not exist is an error; missing default
    /// files fall back to built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigOrigin)> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            let config = Self::from_file(path)?;
            return Ok((config, ConfigOrigin::File(path.to_path_buf())));
        }

        match find_config_file() {
            Some(path) => {
                let config = Self::from_file(&path)?;
                Ok((config, ConfigOrigin::File(path)))
            }
            None => Ok((Self::default(), ConfigOrigin::Defaults)),
        }
    }

    /// Apply CLI/env overrides on top of file values
    pub fn apply_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(address) = overrides.mpd_address {
            self.mpd.address = address;
        }
        if let Some(password) = overrides.mpd_password {
            self.mpd.password = Some(password);
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        self
    }
}

/// Candidate config file locations, in lookup order
pub fn config_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("pickup").join("config.toml"));
    }
    if cfg!(unix) {
        candidates.push(PathBuf::from("/etc/pickup/config.toml"));
    }
    candidates
}

fn find_config_file() -> Option<PathBuf> {
    config_file_candidates().into_iter().find(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.mpd.address, "localhost:6600");
        assert_eq!(config.mpd.password, None);
        assert_eq!(config.mpd.timeout(), Duration::from_secs(10));
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.refresh_interval_secs, 0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
            [mpd]
            password = "secret"

            [server]
            port = 9090
            "#,
        )
        .unwrap();

        assert_eq!(config.mpd.address, "localhost:6600");
        assert_eq!(config.mpd.password.as_deref(), Some("secret"));
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_overrides_win() {
        let config = TomlConfig::default().apply_overrides(ConfigOverrides {
            mpd_address: Some("music.lan:6600".to_string()),
            port: Some(1234),
            ..ConfigOverrides::default()
        });
        assert_eq!(config.mpd.address, "music.lan:6600");
        assert_eq!(config.server.port, 1234);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let result = TomlConfig::from_toml_str("[mpd]\ntimeout_secs = 0");
        match result {
            Err(Error::Config(msg)) => assert!(msg.contains("timeout_secs")),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let result = TomlConfig::from_toml_str("[server]\nport = \"not a number\"");
        assert!(matches!(result, Err(Error::Toml(_))));
    }
}
