use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Supported session storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// In-memory storage (not persistent, used by tests and embedded hosts)
    Memory,
    /// File-based storage (survives process restarts)
    File,
}

impl Default for StorageType {
    fn default() -> Self {
        Self::File
    }
}
