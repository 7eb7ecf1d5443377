use crate::config::validation::{validate_config, validate_export_config, validate_storage_config};
use crate::config::{Config, ConfigError, ExportConfig, StorageConfig};
use crate::types::StorageType;

fn create_test_config() -> Config {
    let mut config = Config::default();
    config.storage = StorageConfig {
        storage_type: StorageType::File,
        base_path: "./data".to_string(),
        session_key: "dealease-demo-session".to_string(),
    };
    config
}

#[test]
fn test_valid_config() {
    validate_config(&create_test_config()).expect("default-shaped config should validate");
}

#[test]
fn test_empty_session_key_rejected() {
    let mut config = create_test_config();
    config.storage.session_key = String::new();
    match validate_config(&config) {
        Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "storage.session_key"),
        other => panic!("Expected InvalidValue for session key, got {:?}", other),
    }
}

#[test]
fn test_path_like_session_key_rejected() {
    for key in ["../session", "nested/session", ".hidden", "with space"] {
        let config = StorageConfig { session_key: key.to_string(), ..StorageConfig::default() };
        assert!(validate_storage_config(&config).is_err(), "key {:?} should be rejected", key);
    }
}

#[test]
fn test_file_storage_requires_base_path() {
    let mut config = create_test_config();
    config.storage.base_path = "   ".to_string();
    assert!(matches!(
        validate_config(&config),
        Err(ConfigError::InvalidValue { ref field, .. }) if field == "storage.base_path"
    ));
}

#[test]
fn test_memory_storage_ignores_base_path() {
    let mut config = create_test_config();
    config.storage.storage_type = StorageType::Memory;
    config.storage.base_path = String::new();
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_export_prefix_must_be_plain_name() {
    let bad = ExportConfig { file_prefix: "exports/dealease".to_string(), ..ExportConfig::default() };
    assert!(validate_export_config(&bad).is_err());

    let empty_dir = ExportConfig { directory: String::new(), ..ExportConfig::default() };
    assert!(validate_export_config(&empty_dir).is_err());

    assert!(validate_export_config(&ExportConfig::default()).is_ok());
}
