//! Core type definitions shared by configuration and the demo engine

mod density;
mod log_level;
mod storage;

pub use density::DensityTier;
pub use log_level::LogLevel;
pub use storage::StorageType;
