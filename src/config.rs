//! Management API configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{Logger, Severity};
use crate::schema::DEFAULT_SCHEMA_REF_PREFIX;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config is not valid JSON or has wrongly typed fields
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Config parsed but a value is out of range
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Management API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagementConfig {
    /// API title in the discovery document (default: "Management API")
    #[serde(default = "default_title")]
    pub title: String,

    /// API version in the discovery document (default: "1.0.0")
    #[serde(default = "default_version")]
    pub version: String,

    /// OpenRPC version in the discovery document (default: "1.3.2")
    #[serde(default = "default_openrpc_version")]
    pub openrpc_version: String,

    /// Prefix for `$ref` pointers (default: "#/components/schemas/")
    #[serde(default = "default_schema_ref_prefix")]
    pub schema_ref_prefix: String,

    /// Largest notification message in bytes (default: 65536)
    #[serde(default = "default_max_notification_size")]
    pub max_notification_size: usize,

    /// Minimum log severity (default: info)
    #[serde(default)]
    pub log_level: Severity,
}

fn default_title() -> String {
    "Management API".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_openrpc_version() -> String {
    "1.3.2".to_string()
}

fn default_schema_ref_prefix() -> String {
    DEFAULT_SCHEMA_REF_PREFIX.to_string()
}

fn default_max_notification_size() -> usize {
    65536
}

impl Default for ManagementConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            version: default_version(),
            openrpc_version: default_openrpc_version(),
            schema_ref_prefix: default_schema_ref_prefix(),
            max_notification_size: default_max_notification_size(),
            log_level: Severity::default(),
        }
    }
}

impl ManagementConfig {
    /// Parses a config from JSON text
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let config: ManagementConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config from a JSON file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&content)
    }

    /// Applies `log_level` to the process-wide logger
    pub fn install_logging(&self) {
        Logger::set_min_severity(self.log_level);
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.max_notification_size == 0 {
            return Err(ConfigError::Invalid(
                "max_notification_size must be > 0".into(),
            ));
        }
        Ok(())
    }
}
