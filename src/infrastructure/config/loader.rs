use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::ClientConfig;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("api_root cannot be empty")]
    EmptyApiRoot,

    #[error("Invalid api_root: {0}. Must start with http:// or https://")]
    InvalidApiRoot(String),

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .hydra/config.yaml (project config)
    /// 3. .hydra/local.yaml (local overrides, optional)
    /// 4. Environment variables (HYDRA_* prefix, highest priority)
    pub fn load() -> Result<ClientConfig> {
        let config: ClientConfig = Self::base()
            .merge(Yaml::file(".hydra/config.yaml"))
            .merge(Yaml::file(".hydra/local.yaml"))
            .merge(Self::env())
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring HYDRA_* overrides
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<ClientConfig> {
        let config: ClientConfig = Self::base()
            .merge(Yaml::file(path.as_ref()))
            .merge(Self::env())
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn base() -> Figment {
        Figment::new().merge(Serialized::defaults(ClientConfig::default()))
    }

    fn env() -> Env {
        Env::prefixed("HYDRA_").split("__")
    }

    /// Validate configuration after loading
    pub fn validate(config: &ClientConfig) -> Result<(), ConfigError> {
        let api_root = config.api_root.trim();
        if api_root.is_empty() {
            return Err(ConfigError::EmptyApiRoot);
        }
        if !(api_root.starts_with("http://") || api_root.starts_with("https://")) {
            return Err(ConfigError::InvalidApiRoot(config.api_root.clone()));
        }

        if config.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.timeout_secs));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::config::{LoggingConfig, RotationPolicy};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClientConfig::default();
        assert_eq!(config.api_root, "http://localhost:8000/api");
        assert_eq!(config.logging.level, "warn");
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
api_root: https://example.com/api/
timeout_secs: 5
default_headers:
  Authorization: Bearer abc
logging:
  level: debug
  format: json
  rotation: hourly
";

        let config: ClientConfig = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.api_base(), "https://example.com/api");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(
            config.default_headers.get("Authorization").map(String::as_str),
            Some("Bearer abc")
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.rotation, RotationPolicy::Hourly);
        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_empty_api_root() {
        let config = ClientConfig::with_api_root("  ");
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyApiRoot)
        ));
    }

    #[test]
    fn test_validate_non_http_api_root() {
        let config = ClientConfig::with_api_root("ftp://example.com");
        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidApiRoot(root)) => assert_eq!(root, "ftp://example.com"),
            other => panic!("Expected InvalidApiRoot error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config = ClientConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTimeout(0))
        ));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let config = ClientConfig {
            logging: LoggingConfig {
                level: "loud".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidLogLevel(level)) => assert_eq!(level, "loud"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = ClientConfig::default();
        config.logging.format = "xml".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogFormat(_))
        ));
    }

    #[test]
    fn test_load_from_file_with_env_override() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "api_root: https://file.example.com/api\ntimeout_secs: 12\nlogging:\n  level: info"
        )
        .unwrap();
        file.flush().unwrap();

        temp_env::with_vars(
            [
                ("HYDRA_TIMEOUT_SECS", Some("7")),
                ("HYDRA_LOGGING__LEVEL", Some("debug")),
            ],
            || {
                let config = ConfigLoader::load_from_file(file.path()).unwrap();
                assert_eq!(config.api_root, "https://file.example.com/api");
                assert_eq!(config.timeout_secs, 7, "Env should win over file");
                assert_eq!(config.logging.level, "debug", "Env should win for nested fields");
                assert_eq!(config.logging.format, "pretty", "Default should persist");
            },
        );
    }

    #[test]
    fn test_load_from_file_rejects_invalid_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "api_root: not-a-url").unwrap();
        file.flush().unwrap();

        temp_env::with_vars_unset(["HYDRA_API_ROOT"], || {
            let err = ConfigLoader::load_from_file(file.path()).unwrap_err();
            assert!(err.to_string().contains("not-a-url"));
        });
    }
}
