use serde::{Deserialize, Serialize};

use crate::demo::records::{DealStage, DemoDataset};

/// Derived counters over a dataset snapshot.
///
/// Always recomputed from a [`DemoDataset`] with [`aggregate`]; never mutated
/// on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DemoStats {
    pub total_buyers: usize,
    pub total_sellers: usize,
    pub total_matches: usize,
    pub total_deals: usize,
    /// Deals in any stage other than completed
    pub active_deals: usize,
    pub completed_deals: usize,
    pub total_messages: usize,
    pub unread_messages: usize,
    pub total_documents: usize,
    pub ai_analysis_count: usize,
}

/// Computes the statistics for `dataset`.
pub fn aggregate(dataset: &DemoDataset) -> DemoStats {
    let completed_deals = dataset.deals_in_stage(DealStage::Completed);
    DemoStats {
        total_buyers: dataset.buyers.len(),
        total_sellers: dataset.sellers.len(),
        total_matches: dataset.matches.len(),
        total_deals: dataset.deals.len(),
        active_deals: dataset.deals.iter().filter(|d| d.stage.is_active()).count(),
        completed_deals,
        total_messages: dataset.messages.len(),
        unread_messages: dataset.messages.iter().filter(|m| !m.read).count(),
        total_documents: dataset.documents.len(),
        ai_analysis_count: dataset.analyses.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::generator::DatasetGenerator;
    use crate::demo::profile::profile_for;
    use crate::demo::settings::DemoSettings;
    use crate::types::DensityTier;

    #[test]
    fn test_empty_dataset_has_zero_stats() {
        assert_eq!(aggregate(&DemoDataset::default()), DemoStats::default());
    }

    #[test]
    fn test_active_plus_completed_equals_total() {
        for tier in DensityTier::ALL {
            let data = DatasetGenerator::with_seed(3)
                .generate(&profile_for(tier), &DemoSettings::for_tier(tier))
                .unwrap();
            let stats = aggregate(&data);
            assert_eq!(stats.active_deals + stats.completed_deals, stats.total_deals);
            assert_eq!(stats.total_deals, data.deals.len());
            assert!(stats.unread_messages <= stats.total_messages);
        }
    }

    #[test]
    fn test_every_count_matches_its_collection() {
        for tier in DensityTier::ALL {
            for seed in [1, 2, 3] {
                let data = DatasetGenerator::with_seed(seed)
                    .generate(&profile_for(tier), &DemoSettings::for_tier(tier))
                    .unwrap();
                let stats = aggregate(&data);
                assert_eq!(stats.total_buyers, data.buyers.len(), "{tier}");
                assert_eq!(stats.total_sellers, data.sellers.len(), "{tier}");
                assert_eq!(stats.total_matches, data.matches.len(), "{tier}");
                assert_eq!(stats.total_deals, data.deals.len(), "{tier}");
                assert_eq!(
                    stats.active_deals,
                    data.deals.iter().filter(|d| d.stage != DealStage::Completed).count(),
                    "{tier}"
                );
                assert_eq!(
                    stats.completed_deals,
                    data.deals.iter().filter(|d| d.stage == DealStage::Completed).count(),
                    "{tier}"
                );
                assert_eq!(stats.total_messages, data.messages.len(), "{tier}");
                assert_eq!(stats.unread_messages, data.messages.iter().filter(|m| !m.read).count(), "{tier}");
                assert_eq!(stats.total_documents, data.documents.len(), "{tier}");
                assert_eq!(stats.ai_analysis_count, data.analyses.len(), "{tier}");
            }
        }
    }

    #[test]
    fn test_unread_count_follows_read_flags() {
        let mut data = DatasetGenerator::with_seed(4)
            .generate(&profile_for(DensityTier::Heavy), &DemoSettings::default())
            .unwrap();
        for (i, message) in data.messages.iter_mut().enumerate() {
            message.read = i % 3 == 0;
        }
        let expected_unread = data.messages.len() - (data.messages.len() + 2) / 3;
        assert_eq!(aggregate(&data).unread_messages, expected_unread);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let data = DatasetGenerator::with_seed(9)
            .generate(&profile_for(DensityTier::Medium), &DemoSettings::default())
            .unwrap();
        assert_eq!(aggregate(&data), aggregate(&data));
    }

    #[test]
    fn test_counts_follow_deal_stage_edits() {
        let mut data = DatasetGenerator::with_seed(5)
            .generate(&profile_for(DensityTier::Medium), &DemoSettings::default())
            .unwrap();
        for deal in &mut data.deals {
            deal.stage = DealStage::Completed;
        }
        let stats = aggregate(&data);
        assert_eq!(stats.completed_deals, data.deals.len());
        assert_eq!(stats.active_deals, 0);
    }
}
