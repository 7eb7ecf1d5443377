//! Configuration validation for the demo engine
//!
//! Checks that values are usable before any store is opened: storage keys and
//! paths must be non-empty and file-name safe, and the export prefix must not
//! smuggle in path components.

use super::error::ConfigError;
use super::{Config, ExportConfig, StorageConfig};
use crate::types::StorageType;

/// Validates the application configuration.
///
/// # Errors
///
/// Returns a `ConfigError` if any validation check fails.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    validate_storage_config(&config.storage)?;
    validate_export_config(&config.export)?;
    Ok(())
}

/// Returns `true` if `name` can be used verbatim as a file name component.
fn is_file_name_safe(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
}

/// Validates the storage configuration.
pub fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if !is_file_name_safe(&config.session_key) {
        return Err(ConfigError::invalid_value(
            "storage.session_key",
            &config.session_key,
            "Session key must be non-empty and contain only letters, digits, '-', '_' or '.'",
        ));
    }

    if config.storage_type == StorageType::File && config.base_path.trim().is_empty() {
        return Err(ConfigError::invalid_value(
            "storage.base_path",
            "",
            "Base path cannot be empty for file storage",
        ));
    }

    Ok(())
}

/// Validates the export configuration.
pub fn validate_export_config(config: &ExportConfig) -> Result<(), ConfigError> {
    if !is_file_name_safe(&config.file_prefix) {
        return Err(ConfigError::invalid_value(
            "export.file_prefix",
            &config.file_prefix,
            "File prefix must be a plain file name without path separators",
        ));
    }
    if config.directory.trim().is_empty() {
        return Err(ConfigError::invalid_value(
            "export.directory",
            "",
            "Export directory cannot be empty",
        ));
    }
    Ok(())
}
