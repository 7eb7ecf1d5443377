//! Referential integrity checks for a dataset.
//!
//! Used by the session store to validate imported and rehydrated payloads,
//! and by tests to assert the generator never emits dangling references.

use std::collections::{HashMap, HashSet};

use crate::demo::records::{DemoDataset, SubjectRef};
use crate::error::{DemoError, Result};

/// Returns a description of every integrity violation in `dataset`.
///
/// An empty vector means every id is unique and every foreign reference
/// resolves within the dataset.
pub fn find_violations(dataset: &DemoDataset) -> Vec<String> {
    let mut violations = Vec::new();

    let mut seen = HashSet::new();
    let all_ids = dataset
        .buyers
        .iter()
        .map(|r| &r.id)
        .chain(dataset.sellers.iter().map(|r| &r.id))
        .chain(dataset.matches.iter().map(|r| &r.id))
        .chain(dataset.deals.iter().map(|r| &r.id))
        .chain(dataset.messages.iter().map(|r| &r.id))
        .chain(dataset.documents.iter().map(|r| &r.id))
        .chain(dataset.analyses.iter().map(|r| &r.id));
    for id in all_ids {
        if id.is_empty() {
            violations.push("record with empty id".to_string());
        } else if !seen.insert(id.as_str()) {
            violations.push(format!("duplicate id '{}'", id));
        }
    }

    let buyers: HashSet<&str> = dataset.buyers.iter().map(|b| b.id.as_str()).collect();
    let sellers: HashSet<&str> = dataset.sellers.iter().map(|s| s.id.as_str()).collect();
    let matches: HashMap<&str, (&str, &str)> = dataset
        .matches
        .iter()
        .map(|m| (m.id.as_str(), (m.buyer_id.as_str(), m.seller_id.as_str())))
        .collect();
    let deals: HashMap<&str, (&str, &str)> = dataset
        .deals
        .iter()
        .map(|d| (d.id.as_str(), (d.buyer_id.as_str(), d.seller_id.as_str())))
        .collect();

    for m in &dataset.matches {
        if !buyers.contains(m.buyer_id.as_str()) {
            violations.push(format!("match '{}' references unknown buyer '{}'", m.id, m.buyer_id));
        }
        if !sellers.contains(m.seller_id.as_str()) {
            violations.push(format!("match '{}' references unknown seller '{}'", m.id, m.seller_id));
        }
    }

    for d in &dataset.deals {
        match matches.get(d.match_id.as_str()) {
            None => violations.push(format!("deal '{}' references unknown match '{}'", d.id, d.match_id)),
            Some(&(buyer, seller)) if buyer != d.buyer_id || seller != d.seller_id => {
                violations.push(format!("deal '{}' parties disagree with match '{}'", d.id, d.match_id))
            }
            Some(_) => {}
        }
    }

    for msg in &dataset.messages {
        match deals.get(msg.deal_id.as_str()) {
            None => violations.push(format!("message '{}' references unknown deal '{}'", msg.id, msg.deal_id)),
            Some(&(buyer, seller)) => {
                for party in [&msg.sender_id, &msg.recipient_id] {
                    if party != buyer && party != seller {
                        violations.push(format!(
                            "message '{}' party '{}' is not part of deal '{}'",
                            msg.id, party, msg.deal_id
                        ));
                    }
                }
            }
        }
    }

    let subject_ok = |subject: &SubjectRef| match subject {
        SubjectRef::Deal(id) => deals.contains_key(id.as_str()),
        SubjectRef::Business(id) => sellers.contains(id.as_str()),
    };
    for doc in &dataset.documents {
        if !subject_ok(&doc.subject) {
            violations.push(format!("document '{}' references unknown subject {:?}", doc.id, doc.subject));
        }
    }
    for analysis in &dataset.analyses {
        if !subject_ok(&analysis.subject) {
            violations.push(format!(
                "analysis '{}' references unknown subject {:?}",
                analysis.id, analysis.subject
            ));
        }
    }

    violations
}

/// Checks `dataset` for integrity violations.
///
/// # Errors
///
/// Returns [`DemoError::MalformedPayload`] naming the first violation and the
/// total count.
pub fn verify_dataset(dataset: &DemoDataset) -> Result<()> {
    let violations = find_violations(dataset);
    match violations.first() {
        None => Ok(()),
        Some(first) => Err(DemoError::malformed(format!(
            "dataset failed integrity check ({} violation(s)): {}",
            violations.len(),
            first
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::generator::DatasetGenerator;
    use crate::demo::profile::profile_for;
    use crate::demo::settings::DemoSettings;
    use crate::types::DensityTier;

    fn sample(tier: DensityTier) -> DemoDataset {
        DatasetGenerator::with_seed(11)
            .generate(&profile_for(tier), &DemoSettings::for_tier(tier))
            .unwrap()
    }

    #[test]
    fn test_generated_datasets_are_clean() {
        for tier in DensityTier::ALL {
            let data = sample(tier);
            assert!(find_violations(&data).is_empty(), "{tier}: {:?}", find_violations(&data));
        }
    }

    #[test]
    fn test_dangling_match_reference_detected() {
        let mut data = sample(DensityTier::Light);
        data.matches[0].buyer_id = "buyer_missing".to_string();
        let err = verify_dataset(&data).unwrap_err();
        assert!(matches!(err, DemoError::MalformedPayload(ref m) if m.contains("buyer_missing")));
    }

    #[test]
    fn test_removed_deal_orphans_messages_and_documents() {
        let mut data = sample(DensityTier::Light);
        data.deals.clear();
        let violations = find_violations(&data);
        assert!(violations.iter().any(|v| v.starts_with("message")));
        assert!(violations.iter().any(|v| v.starts_with("document")));
    }

    #[test]
    fn test_duplicate_ids_detected() {
        let mut data = sample(DensityTier::Medium);
        let dup = data.buyers[0].id.clone();
        data.buyers[1].id = dup;
        assert!(find_violations(&data).iter().any(|v| v.starts_with("duplicate id")));
    }

    #[test]
    fn test_deal_party_mismatch_detected() {
        let mut data = sample(DensityTier::Medium);
        let other_seller = data
            .sellers
            .iter()
            .find(|s| s.id != data.deals[0].seller_id)
            .map(|s| s.id.clone())
            .unwrap();
        data.deals[0].seller_id = other_seller;
        assert!(find_violations(&data).iter().any(|v| v.contains("parties disagree")));
    }
}
