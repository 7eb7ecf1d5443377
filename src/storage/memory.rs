// src/storage/memory.rs

use log::warn;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::{DemoError, Result};
use crate::storage::SessionStorage;

/// An in-memory storage backend, primarily for tests and embedded hosts.
///
/// Clones share the same underlying map, so a test can keep a handle to the
/// backend it passed to a store and inspect or corrupt its records.
///
/// It also includes a mechanism to simulate storage failures for testing
/// error handling paths, configurable via `set_fail_on_write` and
/// `set_fail_on_read`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    records: Arc<Mutex<HashMap<String, String>>>,
    fail_on_write: Arc<Mutex<Option<String>>>,
    fail_on_read: Arc<Mutex<Option<String>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryStorage {
    /// Creates a new, empty `MemoryStorage` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `write` fail with `reason` (e.g. "quota exceeded").
    pub fn set_fail_on_write(&self, reason: impl Into<String>) {
        *self.fail_on_write.lock() = Some(reason.into());
    }

    /// Clears any previously set write failure.
    pub fn clear_fail_on_write(&self) {
        *self.fail_on_write.lock() = None;
    }

    /// Makes every subsequent `read` fail with `reason`.
    pub fn set_fail_on_read(&self, reason: impl Into<String>) {
        *self.fail_on_read.lock() = Some(reason.into());
    }

    /// Clears any previously set read failure.
    pub fn clear_fail_on_read(&self) {
        *self.fail_on_read.lock() = None;
    }

    /// Number of successful writes since creation.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Checks if the storage contains no records.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Removes all records.
    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl SessionStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        if let Some(reason) = self.fail_on_read.lock().as_ref() {
            return Err(DemoError::persistence(format!(
                "Simulated MemoryStorage read failure for '{}': {}",
                key, reason
            )));
        }
        Ok(self.records.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if let Some(reason) = self.fail_on_write.lock().as_ref() {
            warn!("MemoryStorage rejecting write for '{}' ({})", key, reason);
            return Err(DemoError::persistence(format!(
                "Simulated MemoryStorage write failure for '{}': {}",
                key, reason
            )));
        }
        self.records.lock().insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
