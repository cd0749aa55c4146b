use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Levels accepted by the logging configuration.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid cache initial_capacity: {0}. Must be at most {max}", max = MAX_INITIAL_CAPACITY)]
    InvalidCacheCapacity(usize),
}

/// Upper bound on pre-sized cache tables; larger working sets grow on demand.
const MAX_INITIAL_CAPACITY: usize = 1 << 20;

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. canopy.yaml in the working directory of the embedding process
    /// 3. Environment variables (CANOPY_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file("canopy.yaml"))
            .merge(Env::prefixed("CANOPY_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
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

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        if config.cache.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(ConfigError::InvalidCacheCapacity(
                config.cache.initial_capacity,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::domain::models::{CacheConfig, LogFormat, LoggingConfig};

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();

        assert!(ConfigLoader::validate(&config).is_ok());
        assert!(config.cache.enabled);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "cache:\n  enabled: false\n  initial_capacity: 16\nlogging:\n  level: debug\n  format: pretty"
        )
        .expect("write yaml");

        let config = ConfigLoader::load_from_file(file.path()).expect("load");

        assert!(!config.cache.enabled);
        assert_eq!(config.cache.initial_capacity, 16);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn environment_takes_precedence() {
        temp_env::with_var("CANOPY_LOGGING__LEVEL", Some("warn"), || {
            let config = ConfigLoader::load().expect("load");
            assert_eq!(config.logging.level, "warn");
        });
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let config = Config {
            logging: LoggingConfig {
                level: "verbose".to_string(),
                ..LoggingConfig::default()
            },
            ..Config::default()
        };

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn oversized_capacity_is_rejected() {
        let config = Config {
            cache: CacheConfig {
                initial_capacity: usize::MAX,
                ..CacheConfig::default()
            },
            ..Config::default()
        };

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidCacheCapacity(_))
        ));
    }
}
