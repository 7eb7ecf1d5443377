use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString};

use crate::error::{DemoError, Result};

/// Named generation-volume preset controlling synthetic dataset size.
///
/// The tier determines how many records of each kind are generated and has
/// no other semantics. Tiers are ordered by volume: `Light < Medium < Heavy`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum DensityTier {
    /// A handful of profiles, enough for a guided walkthrough
    Light,
    /// Full-size profile set with moderate activity
    Medium,
    /// Maximum volume with extensive history and full analysis coverage
    Heavy,
}

impl DensityTier {
    /// Every tier, lightest first.
    pub const ALL: [DensityTier; 3] = [DensityTier::Light, DensityTier::Medium, DensityTier::Heavy];

    /// Parses a tier name supplied by a UI collaborator.
    ///
    /// Unknown names are rejected with [`DemoError::InvalidArgument`]; they are
    /// never substituted with a default tier.
    pub fn parse(name: &str) -> Result<Self> {
        DensityTier::from_str(name.trim())
            .map_err(|_| DemoError::invalid_argument(format!("unknown density tier '{}'", name)))
    }
}

impl Default for DensityTier {
    fn default() -> Self {
        DensityTier::Medium
    }
}
