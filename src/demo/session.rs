use serde::{Deserialize, Serialize};

use crate::demo::integrity::verify_dataset;
use crate::demo::records::DemoDataset;
use crate::demo::settings::DemoSettings;
use crate::demo::stats::{aggregate, DemoStats};
use crate::error::{DemoError, Result};

/// The top-level demo state: activation flag, settings and dataset.
///
/// `dataset` is present if and only if `is_active` is true. While inactive,
/// `settings` holds the last-known value so configuration screens can be
/// pre-filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DemoSession {
    pub is_active: bool,
    pub settings: DemoSettings,
    pub dataset: Option<DemoDataset>,
}

impl DemoSession {
    /// An inactive session remembering `settings`.
    pub fn inactive(settings: DemoSettings) -> Self {
        Self { is_active: false, settings, dataset: None }
    }

    /// An active session over `dataset`.
    pub fn active(settings: DemoSettings, dataset: DemoDataset) -> Self {
        Self { is_active: true, settings, dataset: Some(dataset) }
    }

    /// Stats for the current dataset, if any.
    pub fn stats(&self) -> Option<DemoStats> {
        self.dataset.as_ref().map(aggregate)
    }

    /// Checks the activation invariant and the dataset's referential integrity.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::MalformedPayload`] on any violation.
    pub fn validate(&self) -> Result<()> {
        match (self.is_active, &self.dataset) {
            (true, None) => Err(DemoError::malformed("session is active but carries no dataset")),
            (false, Some(_)) => Err(DemoError::malformed("session is inactive but carries a dataset")),
            (true, Some(dataset)) => verify_dataset(dataset),
            (false, None) => Ok(()),
        }
    }
}

impl Default for DemoSession {
    fn default() -> Self {
        Self::inactive(DemoSettings::default())
    }
}
