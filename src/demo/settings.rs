use serde::{Deserialize, Serialize};

use crate::types::DensityTier;

/// Options that shape a demo session.
///
/// Only `data_density` influences what the generator produces; the three
/// flags are carried for the UI layer (activity scheduling, live timestamps,
/// toast notifications). `simulate_real_time` also anchors generated
/// timestamps to the current instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DemoSettings {
    /// Generation volume preset
    pub data_density: DensityTier,
    /// Whether the UI should schedule synthetic activity on top of the dataset
    pub auto_generate_activity: bool,
    /// Whether timestamps are anchored to "now"
    pub simulate_real_time: bool,
    /// Whether the UI should raise notifications for synthetic activity
    pub enable_notifications: bool,
}

impl DemoSettings {
    /// Settings for `tier` with every flag enabled.
    pub fn for_tier(tier: DensityTier) -> Self {
        Self {
            data_density: tier,
            auto_generate_activity: true,
            simulate_real_time: true,
            enable_notifications: true,
        }
    }
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self::for_tier(DensityTier::default())
    }
}
