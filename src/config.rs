//! Configuration module for Cumulus.

use serde::Deserialize;
use std::path::Path;

use crate::{CumulusError, Result};

/// Web server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/cumulus.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Object storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Root directory for stored blobs.
    #[serde(default = "default_storage_root")]
    pub root: String,
    /// Application folder prefix inside the store.
    ///
    /// Keeps this application's blobs apart from other tenants of the
    /// same store.
    #[serde(default = "default_storage_folder")]
    pub folder: String,
    /// Public base URL under which stored objects are reachable.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Maximum upload size in megabytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
}

fn default_storage_root() -> String {
    "data/objects".to_string()
}

fn default_storage_folder() -> String {
    "cumulus-drive".to_string()
}

fn default_public_base_url() -> String {
    "/objects".to_string()
}

fn default_max_upload_size() -> u64 {
    50
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_storage_root(),
            folder: default_storage_folder(),
            public_base_url: default_public_base_url(),
            max_upload_size_mb: default_max_upload_size(),
        }
    }
}

impl StorageConfig {
    /// Maximum upload size in bytes.
    pub fn max_upload_size_bytes(&self) -> u64 {
        self.max_upload_size_mb * 1024 * 1024
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/cumulus.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Web server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Object storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(CumulusError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| CumulusError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `CUMULUS_PUBLIC_BASE_URL`: Override the public base URL for objects
    pub fn apply_env_overrides(&mut self) {
        if let Ok(base) = std::env::var("CUMULUS_PUBLIC_BASE_URL") {
            if !base.is_empty() {
                self.storage.public_base_url = base;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.storage.max_upload_size_mb == 0 {
            return Err(CumulusError::Config(
                "storage.max_upload_size_mb must be greater than zero".to_string(),
            ));
        }
        if self.storage.folder.is_empty() {
            return Err(CumulusError::Config(
                "storage.folder must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);

        assert_eq!(config.database.path, "data/cumulus.db");

        assert_eq!(config.storage.root, "data/objects");
        assert_eq!(config.storage.folder, "cumulus-drive");
        assert_eq!(config.storage.public_base_url, "/objects");
        assert_eq!(config.storage.max_upload_size_mb, 50);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/cumulus.log");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080

[database]
path = "custom/db.sqlite"

[storage]
root = "custom/objects"
folder = "my-drive"
public_base_url = "https://cdn.example.com/drive"
max_upload_size_mb = 20

[logging]
level = "debug"
file = "custom/logs/app.log"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.path, "custom/db.sqlite");
        assert_eq!(config.storage.root, "custom/objects");
        assert_eq!(config.storage.folder, "my-drive");
        assert_eq!(
            config.storage.public_base_url,
            "https://cdn.example.com/drive"
        );
        assert_eq!(config.storage.max_upload_size_mb, 20);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/app.log");
    }

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let config = Config::parse("[server]\nport = 9000\n").unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.max_upload_size_mb, 50);
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = Config::parse("not valid = = toml");
        assert!(matches!(result, Err(CumulusError::Config(_))));
    }

    #[test]
    fn test_max_upload_size_bytes() {
        let storage = StorageConfig::default();
        assert_eq!(storage.max_upload_size_bytes(), 50 * 1024 * 1024);
    }

    #[test]
    fn test_validate_rejects_zero_upload_size() {
        let mut config = Config::default();
        config.storage.max_upload_size_mb = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_folder() {
        let mut config = Config::default();
        config.storage.folder = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_default_ok() {
        assert!(Config::default().validate().is_ok());
    }
}
