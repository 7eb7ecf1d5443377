//! Configuration management for the DealEase demo engine
//!
//! This module handles loading, validating, and providing access to the
//! engine configuration. It supports loading configuration from TOML files,
//! environment variables, and programmatic overrides.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod validation;

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod validation_tests;

#[cfg(test)]
#[path = "tests/config_mod_tests.rs"]
mod config_mod_tests;

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::demo::DemoSettings;
use crate::types::{DensityTier, LogLevel, StorageType};

/// Re-export the error type
pub use error::ConfigError;

/// The environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "DEALEASE_";

/// The application name used for finding config directories
const APP_NAME: &str = "dealease-demo";

/// The storage key the session record lives under unless configured otherwise
pub const DEFAULT_SESSION_KEY: &str = "dealease-demo-session";

/// Default file name prefix for exported datasets
pub const DEFAULT_EXPORT_PREFIX: &str = "dealease-demo-data";

/// Main configuration structure for the demo engine.
///
/// # Example
///
/// ```no_run
/// use dealease_demo::config::Config;
///
/// // A missing file falls back to defaults.
/// let config = Config::load("path/that/does/not/exist.toml").unwrap();
/// assert_eq!(config.storage.session_key, "dealease-demo-session");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Demo session defaults
    #[serde(default)]
    pub demo: DemoConfig,

    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Export configuration
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults applied when a session is initialized without explicit settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// Density used when the caller does not name one
    pub default_density: DensityTier,
    /// Default for `autoGenerateActivity`
    pub auto_generate_activity: bool,
    /// Default for `simulateRealTime`
    pub simulate_real_time: bool,
    /// Default for `enableNotifications`
    pub enable_notifications: bool,
    /// Seed for the generator RNG to make runs reproducible
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            default_density: DensityTier::Medium,
            auto_generate_activity: true,
            simulate_real_time: true,
            enable_notifications: true,
            seed: None,
        }
    }
}

impl DemoConfig {
    /// Session settings for `tier` using the configured flag defaults.
    pub fn settings_for(&self, tier: DensityTier) -> DemoSettings {
        DemoSettings {
            data_density: tier,
            auto_generate_activity: self.auto_generate_activity,
            simulate_real_time: self.simulate_real_time,
            enable_notifications: self.enable_notifications,
        }
    }

    /// Session settings for the configured default density.
    pub fn default_settings(&self) -> DemoSettings {
        self.settings_for(self.default_density)
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Storage type
    #[serde(rename = "type")]
    pub storage_type: StorageType,
    /// Base path for file storage (ignored for memory storage)
    pub base_path: String,
    /// Key the session record is stored under
    pub session_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_type: StorageType::File,
            base_path: "./demo-data".to_string(),
            session_key: DEFAULT_SESSION_KEY.to_string(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Directory export files are written to
    pub directory: String,
    /// File name prefix; the export date and `.json` are appended
    pub file_prefix: String,
    /// Whether exported JSON is pretty-printed
    pub pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            file_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
            pretty: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,
    /// Whether to log to console
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            console: true,
        }
    }
}

impl Config {
    /// Loads the configuration from the specified path.
    ///
    /// The file is parsed, environment variable overrides (prefix `DEALEASE_`)
    /// are applied on top, and the result is validated. A missing file falls
    /// back to the built-in defaults (still subject to environment overrides).
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read or
    /// parsed, if an override is malformed, or if validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(config_str) => {
                let mut config: Config = toml::from_str(&config_str)?;

                config.apply_env_vars()?;
                config.validate()?;

                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("Config file not found at {}, using defaults", path.display());
                let mut config = Self::default();
                config.apply_env_vars()?;
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(ConfigError::file_not_found(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Recognized variables: `DEALEASE_LOGGING_LEVEL`, `DEALEASE_DEMO_DENSITY`,
    /// `DEALEASE_DEMO_SEED`, `DEALEASE_STORAGE_TYPE`, `DEALEASE_STORAGE_BASE_PATH`.
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if any recognized variable cannot be parsed.
    pub fn apply_env_vars(&mut self) -> Result<(), ConfigError> {
        for (key, value) in env::vars() {
            let Some(stripped) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match stripped.to_lowercase().as_str() {
                "logging_level" => {
                    self.logging.level = value.parse().map_err(|_| {
                        ConfigError::invalid_value("logging.level", value, "Invalid log level")
                    })?;
                }
                "demo_density" => {
                    self.demo.default_density = value.parse().map_err(|_| {
                        ConfigError::invalid_value("demo.default_density", value, "Expected light, medium or heavy")
                    })?;
                }
                "demo_seed" => {
                    self.demo.seed = Some(value.parse().map_err(|_| {
                        ConfigError::invalid_value("demo.seed", value, "Expected an unsigned integer")
                    })?);
                }
                "storage_type" => {
                    self.storage.storage_type = value.parse().map_err(|_| {
                        ConfigError::invalid_value("storage.type", value, "Expected memory or file")
                    })?;
                }
                "storage_base_path" => {
                    self.storage.base_path = value.to_string();
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_config(self)
    }

    /// Returns the path to the directory where configuration files should be stored.
    ///
    /// This is OS-specific:
    /// - Linux: `$HOME/.config/dealease-demo`
    /// - macOS: `$HOME/Library/Application Support/com.dealease.dealease-demo`
    /// - Windows: `%APPDATA%\\dealease\\dealease-demo`
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "dealease", APP_NAME).map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
    }
}
