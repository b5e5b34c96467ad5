//! Configuration loading with hierarchical merging.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Invalid batch_size: {0}. Must be at least 1")]
    InvalidBatchSize(usize),

    #[error("Invalid vector_size: {0}. Must be at least 1")]
    InvalidVectorSize(u64),

    #[error("Invalid top_k: {0}. Must be at least 1")]
    InvalidTopK(usize),

    #[error("Invalid max_menu_rows: {0}. Must be at least 1")]
    InvalidMaxMenuRows(usize),

    #[error(
        "Invalid backoff configuration: initial_backoff_ms ({0}) must be less than max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults
    /// 2. .savor/config.yaml (project config)
    /// 3. .savor/local.yaml (local overrides, optional)
    /// 4. Environment variables (SAVOR_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".savor/config.yaml"))
            .merge(Yaml::file(".savor/local.yaml"))
            .merge(Env::prefixed("SAVOR_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }

        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(
                config.database.max_connections,
            ));
        }

        if config.ingest.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(config.ingest.batch_size));
        }

        if config.ingest.max_menu_rows == 0 {
            return Err(ConfigError::InvalidMaxMenuRows(config.ingest.max_menu_rows));
        }

        if config.retrieval.vector_size == 0 {
            return Err(ConfigError::InvalidVectorSize(config.retrieval.vector_size));
        }

        if config.retrieval.top_k == 0 {
            return Err(ConfigError::InvalidTopK(config.retrieval.top_k));
        }

        if config.retry.initial_backoff_ms >= config.retry.max_backoff_ms {
            return Err(ConfigError::InvalidBackoff(
                config.retry.initial_backoff_ms,
                config.retry.max_backoff_ms,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = Config::default();
        assert!(ConfigLoader::validate(&config).is_ok());
        assert_eq!(config.retrieval.collection, "restaurants");
        assert_eq!(config.retrieval.vector_size, 512);
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.ingest.batch_size, 500);
    }

    #[test]
    fn rejects_bad_log_level() {
        let config = Config {
            logging: crate::domain::models::LoggingConfig {
                level: "verbose".to_string(),
                ..Default::default()
            },
            ..Config::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn rejects_zero_batch_size() {
        let config = Config {
            ingest: crate::domain::models::IngestConfig {
                batch_size: 0,
                ..Default::default()
            },
            ..Config::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidBatchSize(0))
        ));
    }

    #[test]
    fn rejects_inverted_backoff() {
        let config = Config {
            retry: crate::domain::models::RetryConfig {
                initial_backoff_ms: 60_000,
                max_backoff_ms: 1_000,
                ..Default::default()
            },
            ..Config::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidBackoff(_, _))
        ));
    }
}
