//! Application configuration
//!
//! Configuration is constructed exactly once at process start (from a
//! YAML file or, in the Lambda host, from the environment) and passed by
//! reference into repository constructors. Nothing in the crate reads
//! environment variables after startup.

use serde::{Deserialize, Serialize};

use crate::core::error::{ChanceryError, ConfigError};

/// Environment variable naming the table prefix (read once, in
/// [`AppConfig::from_env`])
pub const TABLE_PREFIX_VAR: &str = "CHANCERY_TABLE_PREFIX";

/// Environment variable overriding the scan ceiling
pub const MAX_SCAN_SIZE_VAR: &str = "CHANCERY_MAX_SCAN_SIZE";

fn default_table_prefix() -> String {
    "chancery".to_string()
}

/// Default ceiling on the filtered working set a single query may load.
///
/// The scan-then-sort approach reads the whole collection on every
/// query; past roughly this many records the pipeline needs secondary
/// indexes or an external search index instead of a bigger limit.
pub const DEFAULT_MAX_SCAN_SIZE: usize = 10_000;

fn default_max_scan_size() -> usize {
    DEFAULT_MAX_SCAN_SIZE
}

/// Process-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Prefix for physical table names (e.g. "chancery-prod")
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,

    /// Ceiling on the number of records a single query may hold in
    /// memory
    #[serde(default = "default_max_scan_size")]
    pub max_scan_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            table_prefix: default_table_prefix(),
            max_scan_size: default_max_scan_size(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ChanceryError> {
        if !std::path::Path::new(path).exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string(),
            }
            .into());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.to_string()),
            message: e.to_string(),
        })?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ChanceryError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Build configuration from the environment.
    ///
    /// This is the single place environment variables are read; call it
    /// once at process start and pass the result around.
    pub fn from_env() -> Result<Self, ChanceryError> {
        let mut config = Self::default();
        if let Ok(prefix) = std::env::var(TABLE_PREFIX_VAR) {
            config.table_prefix = prefix;
        }
        if let Ok(raw) = std::env::var(MAX_SCAN_SIZE_VAR) {
            config.max_scan_size =
                raw.parse::<usize>()
                    .map_err(|e| ConfigError::InvalidValue {
                        field: MAX_SCAN_SIZE_VAR.to_string(),
                        value: raw.clone(),
                        message: e.to_string(),
                    })?;
        }
        Ok(config)
    }

    /// Physical table name for an entity resource
    ///
    /// An empty prefix leaves the resource name untouched.
    pub fn table_name(&self, resource: &str) -> String {
        if self.table_prefix.is_empty() {
            resource.to_string()
        } else {
            format!("{}-{}", self.table_prefix, resource)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.table_prefix, "chancery");
        assert_eq!(config.max_scan_size, DEFAULT_MAX_SCAN_SIZE);
    }

    #[test]
    fn test_table_name() {
        let config = AppConfig {
            table_prefix: "chancery-prod".to_string(),
            ..Default::default()
        };
        assert_eq!(config.table_name("orders"), "chancery-prod-orders");

        let bare = AppConfig {
            table_prefix: String::new(),
            ..Default::default()
        };
        assert_eq!(bare.table_name("orders"), "orders");
    }

    #[test]
    fn test_from_yaml_str() {
        let config = AppConfig::from_yaml_str("table_prefix: staging\nmax_scan_size: 500\n")
            .expect("yaml should parse");
        assert_eq!(config.table_prefix, "staging");
        assert_eq!(config.max_scan_size, 500);
    }

    #[test]
    fn test_from_yaml_str_defaults_missing_fields() {
        let config = AppConfig::from_yaml_str("table_prefix: staging\n").expect("yaml should parse");
        assert_eq!(config.max_scan_size, DEFAULT_MAX_SCAN_SIZE);
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file should create");
        writeln!(file, "table_prefix: filetest").expect("write should succeed");

        let config = AppConfig::from_yaml_file(file.path().to_str().expect("utf-8 path"))
            .expect("file should load");
        assert_eq!(config.table_prefix, "filetest");
    }

    #[test]
    fn test_missing_file_is_a_config_error() {
        let err = AppConfig::from_yaml_file("/nonexistent/chancery.yaml").unwrap_err();
        assert!(matches!(
            err,
            ChanceryError::Config(ConfigError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_yaml_is_a_parse_error() {
        let err = AppConfig::from_yaml_str("max_scan_size: lots\n").unwrap_err();
        assert!(matches!(err, ChanceryError::Config(_)));
    }
}
