// src/lib.rs

//! DealEase demo data engine.
//!
//! Generates a synthetic, internally consistent marketplace dataset (buyers,
//! seller listings, matches, deals, messages, documents and AI analyses) at a
//! chosen density, tracks whether demo mode is active, derives dashboard
//! statistics and persists the session so it survives restarts.

pub mod config;
pub mod demo;
pub mod error;
pub mod facade;
pub mod storage;
pub mod store;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod types;

pub use config::Config;
pub use demo::{aggregate, generate, profile_for, DatasetGenerator, DemoDataset, DemoSession, DemoSettings, DemoStats, VolumeSpec};
pub use error::{DemoError, Result};
pub use facade::{DemoMode, DemoView};
pub use store::{SessionChange, SessionStore, StoreOptions};
pub use types::{DensityTier, LogLevel, StorageType};

/// Loads the configuration and installs the logger.
///
/// `config_path` defaults to `config.toml`; a missing file falls back to the
/// built-in defaults. With the `logging` feature enabled an `env_logger` is
/// installed at the configured level (`RUST_LOG` still wins when set).
///
/// # Errors
///
/// Returns [`DemoError::Config`] if the configuration is invalid and
/// [`DemoError::Logging`] if a global logger is already installed.
pub fn init(config_path: Option<&str>) -> Result<Config> {
    let config = Config::load(config_path.unwrap_or("config.toml"))?;

    #[cfg(feature = "logging")]
    {
        if config.logging.console {
            env_logger::Builder::new()
                .filter_level(config.logging.level.to_level_filter())
                .parse_default_env()
                .try_init()
                .map_err(|e| DemoError::Logging(format!("Failed to initialize logger: {}", e)))?;
        }
    }

    log::info!(
        "Demo engine initialized (storage: {}, default density: {})",
        config.storage.storage_type,
        config.demo.default_density
    );
    Ok(config)
}
