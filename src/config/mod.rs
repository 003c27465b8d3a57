use crate::error::{AggregatorError, ErrorCode, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub dataset: DatasetConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/telemetry.json"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Resolve host and port into a bindable address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                AggregatorError::config_with_code(
                    ErrorCode::CONFIG_INVALID_VALUE,
                    format!("Invalid listen address {}:{}", self.host, self.port),
                    None,
                )
                .with_source(e)
            })
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a TOML configuration file. Missing sections take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AggregatorError::config_with_code(
                ErrorCode::CONFIG_NOT_FOUND,
                "Failed to read configuration file",
                Some(path.to_path_buf()),
            )
            .with_source(e)
        })?;

        Self::from_toml(&content).map_err(|e| e.with_context(path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            AggregatorError::config_with_code(
                ErrorCode::CONFIG_INVALID_TOML,
                "Invalid TOML syntax",
                None,
            )
            .with_source(e)
        })
    }

    /// Apply `TELEMETRY_*` environment overrides
    pub fn merge_env_vars(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    fn merge_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("TELEMETRY_HOST") {
            self.server.host = host;
        }

        if let Some(port) = lookup("TELEMETRY_PORT") {
            match port.parse::<u16>() {
                Ok(value) => self.server.port = value,
                Err(e) => warn!(
                    "Ignoring TELEMETRY_PORT value '{}': {}; keeping port {}",
                    port, e, self.server.port
                ),
            }
        }

        if let Some(path) = lookup("TELEMETRY_DATASET") {
            self.dataset.path = PathBuf::from(path);
        }

        if let Some(level) = lookup("TELEMETRY_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AggregatorError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                "server.port must be non-zero",
                None,
            ));
        }

        if self.dataset.path.as_os_str().is_empty() {
            return Err(AggregatorError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                "dataset.path must not be empty",
                None,
            ));
        }

        self.server.socket_addr().map(|_| ())
    }
}
