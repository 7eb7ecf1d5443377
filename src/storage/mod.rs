// src/storage/mod.rs

//! Durable key/value storage for the persisted demo session.
//!
//! The session store writes one record under a fixed key. Backends only move
//! strings; (de)serialization happens in the store.

pub mod file;
pub mod memory;

use std::fmt::Debug;
use std::sync::Arc;

use crate::config::StorageConfig;
use crate::error::Result;
use crate::types::StorageType;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// A synchronous key/value store for session records.
///
/// Implementations report every failure as
/// [`crate::DemoError::PersistenceFailure`].
pub trait SessionStorage: Send + Sync + Debug {
    /// Reads the record stored under `key`, or `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous record.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// Creates the storage backend described by `config`.
pub fn create_storage_backend(config: &StorageConfig) -> Result<Arc<dyn SessionStorage>> {
    match config.storage_type {
        StorageType::Memory => Ok(Arc::new(MemoryStorage::new())),
        StorageType::File => Ok(Arc::new(FileStorage::new(&config.base_path)?)),
    }
}
