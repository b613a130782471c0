//! Configuration management for patoweb
//!
//! This module handles loading, validation, and management of
//! patoweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Access gate (optional shared secret)
    #[serde(default)]
    pub auth: Option<AuthConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            auth: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Shared-secret access gate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub password: String,
}

/// Data source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the directory holding the CSV tables
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Cash-flow table file name
    #[serde(default = "default_flow_file")]
    pub flow_file: String,
    /// Parameters table file name
    #[serde(default = "default_parameters_file")]
    pub parameters_file: String,
    /// Snapshot time-to-live in seconds; a page view past this age re-reads
    /// the source tables
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            flow_file: default_flow_file(),
            parameters_file: default_parameters_file(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_flow_file() -> String {
    "Fluxo_Caixa.csv".to_string()
}

fn default_parameters_file() -> String {
    "Parametros.csv".to_string()
}

fn default_cache_ttl() -> u64 {
    60
}

/// Savings goal settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalConfig {
    /// Goal target used when the Meta_Reserva parameter is missing or
    /// malformed
    #[serde(default = "default_fallback_target")]
    pub fallback_target: f64,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            fallback_target: default_fallback_target(),
        }
    }
}

fn default_fallback_target() -> f64 {
    800.0
}

/// Dashboard display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Number of columns on the pending-dues board
    #[serde(default = "default_pending_columns")]
    pub pending_columns: usize,
    /// Group name shown in the page header
    #[serde(default = "default_group_name")]
    pub group_name: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            pending_columns: default_pending_columns(),
            group_name: default_group_name(),
        }
    }
}

fn default_pending_columns() -> usize {
    3
}

fn default_group_name() -> String {
    "Patota".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
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

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Data source settings
    #[serde(default)]
    pub data: DataConfig,
    /// Savings goal settings
    #[serde(default)]
    pub goal: GoalConfig,
    /// Dashboard display settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path).map_err(|_| ConfigError::IoError)?;

        let config: Config =
            serde_yaml::from_str(&content).map_err(|_| ConfigError::InvalidYaml)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.data.cache_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "data.cache_ttl_secs".to_string(),
                reason: "Cache TTL must be at least 1 second".to_string(),
            });
        }

        if self.display.pending_columns < 1 || self.display.pending_columns > 6 {
            return Err(ConfigError::InvalidValue {
                field: "display.pending_columns".to_string(),
                reason: "Pending board columns must be between 1 and 6".to_string(),
            });
        }

        if self.goal.fallback_target < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "goal.fallback_target".to_string(),
                reason: "Fallback goal target must not be negative".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Full path to the cash-flow table
    pub fn flow_path(&self) -> PathBuf {
        self.data.path.join(&self.data.flow_file)
    }

    /// Full path to the parameters table
    pub fn parameters_path(&self) -> PathBuf {
        self.data.path.join(&self.data.parameters_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.data.cache_ttl_secs, 60);
        assert_eq!(config.goal.fallback_target, 800.0);
        assert_eq!(config.display.pending_columns, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let mut config = Config::default();
        config.data.cache_ttl_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_columns() {
        let mut config = Config::default();
        config.display.pending_columns = 0;
        assert!(config.validate().is_err());
        config.display.pending_columns = 7;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_template_parses() {
        let config: Config = serde_yaml::from_str(Config::generate_default()).unwrap();
        assert!(config.validate().is_ok());
    }
}
