//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides; command-line
//! flags are applied on top by the binary.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::ApiConfig;
use crate::dashboard::controls::DEFAULT_TITLE;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input dataset configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    /// Path to the surveillance CSV; required before serving
    pub path: Option<PathBuf>,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_enable_export")]
    pub enable_export: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8051
}

fn default_enable_export() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_export: default_enable_export(),
        }
    }
}

impl ServerConfig {
    /// Convert to the API layer's configuration
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            host: self.host.clone(),
            port: self.port,
            enable_export: self.enable_export,
        }
    }
}

/// Page presentation settings
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
        }
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
    "info".to_string()
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

impl LoggingConfig {
    /// True when JSON log lines were requested
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// A config file that exists but cannot be read or parsed is an error,
    /// never a silent fallback to defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("wbe-dashboard").join("config.toml")),
            Some(PathBuf::from("./wbe-dashboard.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        match Self::load_first_existing(&config_paths)? {
            Some(config) => Ok(config),
            None => Self::from_env(),
        }
    }

    /// Load the first path that exists; `None` when none of them do
    fn load_first_existing(paths: &[PathBuf]) -> Result<Option<Self>, ConfigError> {
        match paths.iter().find(|p| p.exists()) {
            Some(path) => Self::load_with_env(path).map(Some),
            None => Ok(None),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (the environment in production)
    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("WBE_DATA_PATH") {
            self.data.path = Some(PathBuf::from(path));
        }

        if let Some(host) = lookup("WBE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("WBE_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "WBE_PORT",
                value: port.clone(),
            })?;
        }

        if let Some(level) = lookup("WBE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("WBE_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("No data file configured (use --data, WBE_DATA_PATH or [data] path)")]
    MissingDataPath,
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Wastewater Dashboard Configuration
#
# Environment variables override these settings:
# - WBE_DATA_PATH
# - WBE_HOST
# - WBE_PORT
# - WBE_LOG_LEVEL
# - WBE_LOG_FORMAT

[data]
# Surveillance CSV with sample.loc, sample.date, wildtype and LDL columns
# path = "/srv/wbe/msu_wbe_data.csv"

[server]
# HTTP server host
host = "127.0.0.1"

# HTTP server port
port = 8051

# Allow downloading the filtered samples as CSV
enable_export = true

[dashboard]
# Page heading
title = "MSU Wastewater Dashboard"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

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
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8051);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.dashboard.title, "MSU Wastewater Dashboard");
        assert!(config.data.path.is_none());
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.server.port, 8051);
        assert!(config.server.enable_export);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
[data]
path = "/tmp/samples.csv"

[server]
port = 9000
"#,
        )
        .unwrap();

        assert_eq!(config.data.path, Some(PathBuf::from("/tmp/samples.csv")));
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nformat = \"json\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_parse_error_names_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref path, .. } if path == file.path()));
    }

    #[test]
    fn test_first_existing_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config.toml");
        let present = dir.path().join("wbe-dashboard.toml");
        std::fs::write(&present, "[dashboard]\ntitle = \"Local\"\n").unwrap();

        let config = Config::load_first_existing(&[missing.clone(), present])
            .unwrap()
            .unwrap();
        assert_eq!(config.dashboard.title, "Local");

        assert!(Config::load_first_existing(&[missing]).unwrap().is_none());
    }

    #[test]
    fn test_broken_default_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("wbe-dashboard.toml");
        std::fs::write(&broken, "[server\nport = 9999").unwrap();

        let err = Config::load_first_existing(&[dir.path().join("config.toml"), broken.clone()])
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref path, .. } if *path == broken));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("WBE_DATA_PATH", "/data/wbe.csv"),
            ("WBE_PORT", "8123"),
            ("WBE_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.data.path, Some(PathBuf::from("/data/wbe.csv")));
        assert_eq!(config.server.port, 8123);
        assert!(config.logging.is_json());
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_invalid_port_override_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(|k| (k == "WBE_PORT").then(|| "not-a-port".to_string()))
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidEnv { key: "WBE_PORT", .. }));
        assert_eq!(config.server.port, 8051);
    }

    #[test]
    fn test_api_config_conversion() {
        let server = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_export: false,
        };
        let api = server.api_config();
        assert_eq!(api.addr(), "0.0.0.0:8080");
        assert!(!api.enable_export);
    }
}
