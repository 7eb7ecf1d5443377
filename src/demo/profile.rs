//! Density profile table.
//!
//! Maps each [`DensityTier`] to the volume of synthetic records generated for
//! it. The table is total and every tier's counts are at least those of the
//! lighter tiers.

use serde::{Deserialize, Serialize};

use crate::error::{DemoError, Result};
use crate::types::DensityTier;

/// Generation volumes for one density tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeSpec {
    /// Number of buyer profiles
    pub buyers: usize,
    /// Number of seller listings (businesses)
    pub sellers: usize,
    /// Number of buyer/seller matches
    pub matches: usize,
    /// Number of deals, each opened on a distinct match
    pub deals: usize,
    /// Number of deal messages
    pub messages: usize,
    /// Number of documents attached to deals or businesses
    pub documents: usize,
    /// Number of AI analysis records
    pub analyses: usize,
}

const LIGHT: VolumeSpec = VolumeSpec {
    buyers: 3,
    sellers: 3,
    matches: 2,
    deals: 1,
    messages: 4,
    documents: 2,
    analyses: 1,
};

const MEDIUM: VolumeSpec = VolumeSpec {
    buyers: 8,
    sellers: 8,
    matches: 12,
    deals: 6,
    messages: 30,
    documents: 16,
    analyses: 8,
};

// One analysis per deal plus one per business.
const HEAVY: VolumeSpec = VolumeSpec {
    buyers: 20,
    sellers: 20,
    matches: 40,
    deals: 20,
    messages: 120,
    documents: 60,
    analyses: 40,
};

/// Returns the generation volumes for `tier`.
pub fn profile_for(tier: DensityTier) -> VolumeSpec {
    match tier {
        DensityTier::Light => LIGHT,
        DensityTier::Medium => MEDIUM,
        DensityTier::Heavy => HEAVY,
    }
}

impl VolumeSpec {
    /// Total number of records of all kinds.
    pub fn total_records(&self) -> usize {
        self.buyers + self.sellers + self.matches + self.deals + self.messages + self.documents + self.analyses
    }

    /// Returns `true` if every count in `self` is at least the matching count in `other`.
    pub fn covers(&self, other: &VolumeSpec) -> bool {
        self.buyers >= other.buyers
            && self.sellers >= other.sellers
            && self.matches >= other.matches
            && self.deals >= other.deals
            && self.messages >= other.messages
            && self.documents >= other.documents
            && self.analyses >= other.analyses
    }

    /// Checks that a dataset with these volumes can be generated without
    /// dangling references.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::InvalidArgument`] when the counts are infeasible,
    /// e.g. more matches than distinct buyer/seller pairs.
    pub fn validate(&self) -> Result<()> {
        let pairs = self.buyers.saturating_mul(self.sellers);
        if self.matches > pairs {
            return Err(DemoError::invalid_argument(format!(
                "{} matches requested but only {} distinct buyer/seller pairs exist",
                self.matches, pairs
            )));
        }
        if self.deals > self.matches {
            return Err(DemoError::invalid_argument(format!(
                "{} deals requested but only {} matches exist",
                self.deals, self.matches
            )));
        }
        if self.messages > 0 && self.deals == 0 {
            return Err(DemoError::invalid_argument("messages require at least one deal"));
        }
        if (self.documents > 0 || self.analyses > 0) && self.deals == 0 && self.sellers == 0 {
            return Err(DemoError::invalid_argument(
                "documents and analyses require at least one deal or business",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_profile_matches_walkthrough_copy() {
        let light = profile_for(DensityTier::Light);
        assert_eq!(light.buyers, 3);
        assert_eq!(light.sellers, 3);
        assert_eq!(light.matches, 2);
        assert_eq!(light.deals, 1);
    }

    #[test]
    fn test_profiles_are_monotonic() {
        let light = profile_for(DensityTier::Light);
        let medium = profile_for(DensityTier::Medium);
        let heavy = profile_for(DensityTier::Heavy);
        assert!(medium.covers(&light));
        assert!(heavy.covers(&medium));
        assert!(heavy.total_records() > medium.total_records());
    }

    #[test]
    fn test_builtin_profiles_are_feasible() {
        for tier in DensityTier::ALL {
            profile_for(tier).validate().unwrap();
        }
    }

    #[test]
    fn test_infeasible_specs_are_rejected() {
        let too_many_matches = VolumeSpec { matches: 10, ..profile_for(DensityTier::Light) };
        assert!(matches!(too_many_matches.validate(), Err(DemoError::InvalidArgument(_))));

        let too_many_deals = VolumeSpec { deals: 3, ..profile_for(DensityTier::Light) };
        assert!(too_many_deals.validate().is_err());

        let orphan_messages = VolumeSpec { deals: 0, ..profile_for(DensityTier::Light) };
        assert!(orphan_messages.validate().is_err());
    }
}
