// src/test_utils.rs

//! Helpers shared by unit tests, integration tests and benches.
//!
//! Compiled for unit tests and behind the `test-utils` feature.

use std::sync::{Arc, OnceLock};

use crate::config::Config;
use crate::storage::MemoryStorage;
use crate::store::{SessionStore, StoreOptions};
use crate::StorageType;

/// Seed used by [`seeded_store`] so test content is reproducible.
pub const TEST_SEED: u64 = 0x00de_a1ea;

/// Provides a common test configuration with in-memory storage.
pub fn get_test_config() -> &'static Config {
    static TEST_CONFIG: OnceLock<Config> = OnceLock::new();
    TEST_CONFIG.get_or_init(|| {
        let mut config = Config::default();
        config.storage.storage_type = StorageType::Memory;
        config.storage.base_path = "".to_string();
        config.demo.seed = Some(TEST_SEED);
        config
    })
}

/// A store over fresh in-memory storage; the storage handle is returned so
/// tests can inspect writes or inject failures.
pub fn memory_store() -> (Arc<SessionStore>, MemoryStorage) {
    let storage = MemoryStorage::new();
    let store = SessionStore::open(Arc::new(storage.clone()))
        .unwrap_or_else(|e| panic!("empty memory storage must open: {e}"));
    (Arc::new(store), storage)
}

/// Like [`memory_store`] but with a fixed generator seed.
pub fn seeded_store() -> (Arc<SessionStore>, MemoryStorage) {
    let storage = MemoryStorage::new();
    let options = StoreOptions::from_config(get_test_config());
    let store = SessionStore::open_with(Arc::new(storage.clone()), options)
        .unwrap_or_else(|e| panic!("empty memory storage must open: {e}"));
    (Arc::new(store), storage)
}
