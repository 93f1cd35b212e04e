//! Configuration management module.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::paginate::{DEFAULT_PAGE_SIZE, PAGE_SIZES};

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub service: ServiceConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub table: TableConfig,
}

/// Roster service connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Persistent storage scope settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Override for the persistent scope file. Defaults to the platform
    /// data directory.
    pub file: Option<PathBuf>,
}

/// Table presentation defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    pub page_size: usize,
}

impl AppConfig {
    /// Get config file path (same directory as executable).
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Path of the persistent storage scope file.
    pub fn storage_file(&self) -> PathBuf {
        if let Some(path) = &self.storage.file {
            return path.clone();
        }
        ProjectDirs::from("", "", "roster-client")
            .map(|dirs| dirs.data_dir().join("storage.json"))
            .unwrap_or_else(|| PathBuf::from("storage.json"))
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service.base_url.trim().is_empty() {
            return Err(ConfigError::Validation("Service URL cannot be empty".to_string()));
        }
        if !self.service.base_url.starts_with("http") {
            return Err(ConfigError::Validation(
                "Service URL must start with http:// or https://".to_string(),
            ));
        }
        if self.service.timeout_secs < 5 {
            return Err(ConfigError::Validation(
                "Request timeout must be at least 5 seconds".to_string(),
            ));
        }
        if !PAGE_SIZES.contains(&self.table.page_size) {
            return Err(ConfigError::Validation(format!(
                "Page size must be one of {PAGE_SIZES:?}"
            )));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_url() {
        let mut config = AppConfig::default();
        config.service.base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_scheme() {
        let mut config = AppConfig::default();
        config.service.base_url = "ftp://invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_timeout_lower_bound() {
        let mut config = AppConfig::default();
        config.service.timeout_secs = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_page_size_membership() {
        let mut config = AppConfig::default();

        config.table.page_size = 7;
        assert!(config.validate().is_err());

        config.table.page_size = 25;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_parses_with_defaults() {
        let toml = r#"
            [service]
            base_url = "https://hr.example.com/api"
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();

        assert_eq!(config.service.timeout_secs, 30);
        assert_eq!(config.table.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.storage.file.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_storage_file_override() {
        let mut config = AppConfig::default();
        config.storage.file = Some(PathBuf::from("/tmp/roster/storage.json"));
        assert_eq!(config.storage_file(), PathBuf::from("/tmp/roster/storage.json"));
    }
}
