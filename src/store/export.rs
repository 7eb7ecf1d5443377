//! Export document format.
//!
//! An export is a UTF-8 JSON document wrapping the serialized session with a
//! format version, the export instant, the derived stats and a SHA-256
//! checksum over the compact JSON of the session. Import re-validates every
//! part of it before the store is touched.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::demo::{DemoSession, DemoStats};
use crate::error::{DemoError, Result};

/// Current export format version.
pub const EXPORT_FORMAT_VERSION: u32 = 1;

/// A transportable snapshot of a demo session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExportDocument {
    pub format_version: u32,
    pub exported_at: DateTime<Utc>,
    /// Hex SHA-256 of the compact JSON encoding of `session`
    pub checksum: String,
    pub session: DemoSession,
    /// Stats derived from `session.dataset`; `null` when inactive
    pub stats: Option<DemoStats>,
}

impl ExportDocument {
    /// Builds an export of `session` stamped with `exported_at`.
    pub fn new(session: &DemoSession, exported_at: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            format_version: EXPORT_FORMAT_VERSION,
            exported_at,
            checksum: session_checksum(session)?,
            session: session.clone(),
            stats: session.stats(),
        })
    }

    /// Serializes the document.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Parses and validates an export payload.
    ///
    /// # Errors
    ///
    /// Every failure is reported as [`DemoError::MalformedPayload`]: invalid
    /// JSON or shape, unsupported version, checksum mismatch, a session whose
    /// flag and dataset disagree, dangling references, or stats that do not
    /// match the dataset.
    pub fn parse(payload: &str) -> Result<Self> {
        let doc: ExportDocument = serde_json::from_str(payload)
            .map_err(|e| DemoError::malformed(format!("export payload is not a valid demo export: {}", e)))?;

        if doc.format_version != EXPORT_FORMAT_VERSION {
            return Err(DemoError::malformed(format!(
                "unsupported export format version {} (expected {})",
                doc.format_version, EXPORT_FORMAT_VERSION
            )));
        }

        let expected = session_checksum(&doc.session)?;
        if !doc.checksum.eq_ignore_ascii_case(&expected) {
            return Err(DemoError::malformed("export checksum does not match session content"));
        }

        doc.session.validate()?;

        if doc.stats != doc.session.stats() {
            return Err(DemoError::malformed("exported stats do not match the dataset"));
        }

        Ok(doc)
    }
}

/// Hex SHA-256 over the compact JSON encoding of `session`.
pub fn session_checksum(session: &DemoSession) -> Result<String> {
    let bytes = serde_json::to_vec(session)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// File name for an export taken on `date`, e.g. `dealease-demo-data-2024-03-01.json`.
pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}-{}.json", prefix, date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::{profile_for, DatasetGenerator, DemoSettings};
    use crate::types::DensityTier;

    fn active_session() -> DemoSession {
        let settings = DemoSettings::for_tier(DensityTier::Light);
        let dataset = DatasetGenerator::with_seed(21)
            .generate(&profile_for(DensityTier::Light), &settings)
            .unwrap();
        DemoSession::active(settings, dataset)
    }

    #[test]
    fn test_file_name_uses_calendar_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(export_file_name("dealease-demo-data", date), "dealease-demo-data-2024-03-01.json");
    }

    #[test]
    fn test_export_parses_back() {
        let session = active_session();
        let doc = ExportDocument::new(&session, Utc::now()).unwrap();
        for pretty in [true, false] {
            let parsed = ExportDocument::parse(&doc.to_json(pretty).unwrap()).unwrap();
            assert_eq!(parsed.session, session);
            assert_eq!(parsed.stats, session.stats());
        }
    }

    #[test]
    fn test_inactive_export_has_null_stats() {
        let doc = ExportDocument::new(&DemoSession::default(), Utc::now()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&doc.to_json(false).unwrap()).unwrap();
        assert!(value["stats"].is_null());
        assert!(value["session"]["dataset"].is_null());
        assert_eq!(value["formatVersion"], 1);
    }

    #[test]
    fn test_tampered_content_fails_checksum() {
        let doc = ExportDocument::new(&active_session(), Utc::now()).unwrap();
        let mut value = serde_json::to_value(&doc).unwrap();
        value["session"]["dataset"]["buyers"][0]["name"] = serde_json::json!("Mallory");
        let err = ExportDocument::parse(&value.to_string()).unwrap_err();
        assert!(matches!(err, DemoError::MalformedPayload(ref m) if m.contains("checksum")));
    }

    #[test]
    fn test_wrong_stats_rejected() {
        let mut doc = ExportDocument::new(&active_session(), Utc::now()).unwrap();
        if let Some(stats) = doc.stats.as_mut() {
            stats.total_buyers += 1;
        }
        let err = ExportDocument::parse(&doc.to_json(false).unwrap()).unwrap_err();
        assert!(matches!(err, DemoError::MalformedPayload(ref m) if m.contains("stats")));
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let mut doc = ExportDocument::new(&DemoSession::default(), Utc::now()).unwrap();
        doc.format_version = 99;
        assert!(matches!(
            ExportDocument::parse(&doc.to_json(false).unwrap()),
            Err(DemoError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        for payload in ["not json", "{}", "[]", "{\"formatVersion\":1}"] {
            assert!(matches!(ExportDocument::parse(payload), Err(DemoError::MalformedPayload(_))), "{payload}");
        }
    }
}
