//! Synthetic entity generator.
//!
//! Records are produced in dependency order: buyers and sellers first, then
//! matches over existing buyer/seller pairs, then deals over existing
//! matches, then messages, documents and analyses over existing deals and
//! businesses. Each stage only draws ids from collections that are already
//! complete, which is what keeps the dataset free of dangling references.

use chrono::{DateTime, Duration, TimeZone, Utc};
use fake::faker::address::en::{CityName, StateAbbr};
use fake::faker::company::en::{CompanyName, Industry};
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::Fake;
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::demo::profile::VolumeSpec;
use crate::demo::records::{
    AiAnalysis, AnalysisKind, Buyer, Deal, DealStage, DemoDataset, Document, DocumentKind, Match, Message,
    Seller, SubjectRef,
};
use crate::demo::settings::DemoSettings;
use crate::error::Result;

/// 2024-01-15T09:00:00Z, used when timestamps are not anchored to "now".
const CANONICAL_ANCHOR_SECS: i64 = 1_705_309_200;

const MATCH_REASONS: &[&str] = &[
    "Budget covers asking price",
    "Industry experience aligns",
    "Preferred region",
    "Strong revenue multiple",
    "Owner open to seller financing",
    "Operational overlap with existing portfolio",
];

const MESSAGE_OPENERS: &[&str] = &[
    "Thanks for sharing the latest numbers.",
    "Following up on our call earlier.",
    "Could you send over the customer concentration breakdown?",
    "We reviewed the financials with our advisor.",
    "Happy to schedule a site visit next week.",
    "Attached are our questions on the lease terms.",
];

/// Generates a [`DemoDataset`] for a volume specification.
///
/// Field content (names, text, timestamps) is random; cardinalities always
/// equal the profile. A generator built with [`DatasetGenerator::with_seed`]
/// produces the same content for the same profile and settings when
/// timestamps are not anchored to the current time.
pub struct DatasetGenerator {
    rng: StdRng,
}

impl DatasetGenerator {
    /// Create a generator seeded from system entropy.
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Create a generator with a fixed seed to make runs reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Produce a full dataset for `profile`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DemoError::InvalidArgument`] if `profile` is infeasible
    /// (see [`VolumeSpec::validate`]). The built-in tier profiles always pass.
    pub fn generate(&mut self, profile: &VolumeSpec, settings: &DemoSettings) -> Result<DemoDataset> {
        profile.validate()?;
        let anchor = anchor_for(settings);

        let buyers = self.buyers(profile.buyers, anchor);
        let sellers = self.sellers(profile.sellers, anchor);
        let matches = self.matches(profile.matches, &buyers, &sellers, anchor);
        let deals = self.deals(profile.deals, &matches, &sellers, anchor);
        let messages = self.messages(profile.messages, &deals, anchor);

        let subjects: Vec<SubjectRef> = deals
            .iter()
            .map(|d| SubjectRef::Deal(d.id.clone()))
            .chain(sellers.iter().map(|s| SubjectRef::Business(s.id.clone())))
            .collect();
        let documents = self.documents(profile.documents, &subjects, &deals, &sellers, anchor);
        let analyses = self.analyses(profile.analyses, &subjects, anchor);

        debug!(
            "Generated demo dataset ({}): {} buyers, {} sellers, {} matches, {} deals, {} messages, {} documents, {} analyses",
            settings.data_density,
            buyers.len(),
            sellers.len(),
            matches.len(),
            deals.len(),
            messages.len(),
            documents.len(),
            analyses.len()
        );

        Ok(DemoDataset { buyers, sellers, matches, deals, messages, documents, analyses })
    }

    fn next_id(&mut self, prefix: &str) -> String {
        let bytes: [u8; 16] = self.rng.gen();
        let id = uuid::Builder::from_random_bytes(bytes).into_uuid();
        format!("{}_{}", prefix, id.simple())
    }

    /// A timestamp between `min` and `max` before `anchor`.
    fn before(&mut self, anchor: DateTime<Utc>, min: Duration, max: Duration) -> DateTime<Utc> {
        let lo = min.num_seconds();
        let hi = max.num_seconds().max(lo);
        anchor - Duration::seconds(self.rng.gen_range(lo..=hi))
    }

    fn location(&mut self) -> String {
        let city: String = CityName().fake_with_rng(&mut self.rng);
        let state: String = StateAbbr().fake_with_rng(&mut self.rng);
        format!("{}, {}", city, state)
    }

    fn buyers(&mut self, count: usize, anchor: DateTime<Utc>) -> Vec<Buyer> {
        (0..count)
            .map(|_| {
                let budget_min = self.rng.gen_range(2..=40u64) * 250_000;
                let budget_max = budget_min * self.rng.gen_range(2..=4u64);
                let industries = self.rng.gen_range(1..=3usize);
                Buyer {
                    id: self.next_id("buyer"),
                    name: Name().fake_with_rng(&mut self.rng),
                    email: SafeEmail().fake_with_rng(&mut self.rng),
                    company: CompanyName().fake_with_rng(&mut self.rng),
                    location: self.location(),
                    budget_min,
                    budget_max,
                    target_industries: (0..industries).map(|_| Industry().fake_with_rng(&mut self.rng)).collect(),
                    verified: self.rng.gen_bool(0.7),
                    joined_at: self.before(anchor, Duration::weeks(2), Duration::weeks(26)),
                }
            })
            .collect()
    }

    fn sellers(&mut self, count: usize, anchor: DateTime<Utc>) -> Vec<Seller> {
        (0..count)
            .map(|_| {
                let annual_revenue = self.rng.gen_range(4..=120u64) * 100_000;
                let multiple = self.rng.gen_range(8..=30u64);
                Seller {
                    id: self.next_id("seller"),
                    owner_name: Name().fake_with_rng(&mut self.rng),
                    business_name: CompanyName().fake_with_rng(&mut self.rng),
                    industry: Industry().fake_with_rng(&mut self.rng),
                    location: self.location(),
                    asking_price: annual_revenue * multiple / 10,
                    annual_revenue,
                    employees: self.rng.gen_range(3..=250),
                    listed_at: self.before(anchor, Duration::weeks(1), Duration::weeks(20)),
                }
            })
            .collect()
    }

    /// Picks `count` distinct buyer/seller pairs.
    fn matches(&mut self, count: usize, buyers: &[Buyer], sellers: &[Seller], anchor: DateTime<Utc>) -> Vec<Match> {
        let mut pairs: Vec<(usize, usize)> = (0..buyers.len())
            .flat_map(|b| (0..sellers.len()).map(move |s| (b, s)))
            .collect();
        pairs.shuffle(&mut self.rng);

        pairs
            .into_iter()
            .take(count)
            .map(|(b, s)| {
                let reason_count = self.rng.gen_range(1..=3usize);
                Match {
                    id: self.next_id("match"),
                    buyer_id: buyers[b].id.clone(),
                    seller_id: sellers[s].id.clone(),
                    score: self.rng.gen_range(55..=98),
                    reasons: MATCH_REASONS
                        .choose_multiple(&mut self.rng, reason_count)
                        .map(|r| r.to_string())
                        .collect(),
                    created_at: self.before(anchor, Duration::days(3), Duration::weeks(4)),
                }
            })
            .collect()
    }

    /// Opens one deal on each of the first `count` matches.
    ///
    /// Stages rotate through the lifecycle so that every stage's population
    /// grows with the deal count.
    fn deals(&mut self, count: usize, matches: &[Match], sellers: &[Seller], anchor: DateTime<Utc>) -> Vec<Deal> {
        matches
            .iter()
            .take(count)
            .enumerate()
            .map(|(i, m)| {
                let stage = DealStage::ALL[i % DealStage::ALL.len()];
                let asking = sellers
                    .iter()
                    .find(|s| s.id == m.seller_id)
                    .map(|s| s.asking_price)
                    .unwrap_or_default();
                let opened_at = self.before(anchor, Duration::days(2), Duration::days(21));
                let updated_at = self.before(anchor, Duration::minutes(5), Duration::days(2)).max(opened_at);
                Deal {
                    id: self.next_id("deal"),
                    match_id: m.id.clone(),
                    buyer_id: m.buyer_id.clone(),
                    seller_id: m.seller_id.clone(),
                    stage,
                    offer_amount: asking * self.rng.gen_range(80..=105u64) / 100,
                    opened_at,
                    updated_at,
                }
            })
            .collect()
    }

    fn messages(&mut self, count: usize, deals: &[Deal], anchor: DateTime<Utc>) -> Vec<Message> {
        if deals.is_empty() {
            return Vec::new();
        }
        (0..count)
            .map(|j| {
                let deal = &deals[j % deals.len()];
                // Alternate direction on each pass over the deals.
                let (sender_id, recipient_id) = if (j / deals.len()) % 2 == 0 {
                    (deal.buyer_id.clone(), deal.seller_id.clone())
                } else {
                    (deal.seller_id.clone(), deal.buyer_id.clone())
                };
                let opener = MESSAGE_OPENERS.choose(&mut self.rng).copied().unwrap_or_default();
                let detail: String = Sentence(4..10).fake_with_rng(&mut self.rng);
                let read = !deal.stage.is_active() || self.rng.gen_bool(0.6);
                Message {
                    id: self.next_id("msg"),
                    deal_id: deal.id.clone(),
                    sender_id,
                    recipient_id,
                    body: format!("{} {}", opener, detail),
                    read,
                    sent_at: self.before(anchor, Duration::minutes(2), Duration::weeks(2)),
                }
            })
            .collect()
    }

    fn documents(
        &mut self,
        count: usize,
        subjects: &[SubjectRef],
        deals: &[Deal],
        sellers: &[Seller],
        anchor: DateTime<Utc>,
    ) -> Vec<Document> {
        if subjects.is_empty() {
            return Vec::new();
        }
        (0..count)
            .map(|j| {
                let subject = subjects[j % subjects.len()].clone();
                let kind = DocumentKind::ALL[(j / subjects.len() + j) % DocumentKind::ALL.len()];
                let seller_id = match &subject {
                    SubjectRef::Deal(id) => deals.iter().find(|d| &d.id == id).map(|d| d.seller_id.as_str()),
                    SubjectRef::Business(id) => Some(id.as_str()),
                };
                let business = seller_id
                    .and_then(|sid| sellers.iter().find(|s| s.id == sid))
                    .map(|s| s.business_name.as_str())
                    .unwrap_or("Listing");
                Document {
                    id: self.next_id("doc"),
                    title: format!("{} - {}", kind.title(), business),
                    subject,
                    kind,
                    size_bytes: self.rng.gen_range(40..=4_096u64) * 1_024,
                    uploaded_at: self.before(anchor, Duration::hours(1), Duration::weeks(3)),
                }
            })
            .collect()
    }

    fn analyses(&mut self, count: usize, subjects: &[SubjectRef], anchor: DateTime<Utc>) -> Vec<AiAnalysis> {
        if subjects.is_empty() {
            return Vec::new();
        }
        (0..count)
            .map(|j| {
                let subject = subjects[j % subjects.len()].clone();
                let kind = match &subject {
                    SubjectRef::Deal(_) => AnalysisKind::ALL[(j + 1) % AnalysisKind::ALL.len()],
                    SubjectRef::Business(_) => AnalysisKind::Valuation,
                };
                let confidence = self.rng.gen_range(62..=96);
                AiAnalysis {
                    id: self.next_id("analysis"),
                    summary: self.analysis_summary(kind),
                    subject,
                    kind,
                    confidence,
                    generated_at: self.before(anchor, Duration::minutes(30), Duration::weeks(2)),
                }
            })
            .collect()
    }

    fn analysis_summary(&mut self, kind: AnalysisKind) -> String {
        match kind {
            AnalysisKind::Valuation => format!(
                "Estimated enterprise value of {:.1}x trailing EBITDA based on comparable transactions.",
                f64::from(self.rng.gen_range(25..=70u32)) / 10.0
            ),
            AnalysisKind::RiskAssessment => format!(
                "{} risk factors identified; customer concentration is the largest exposure.",
                self.rng.gen_range(2..=7u32)
            ),
            AnalysisKind::MarketComparison => format!(
                "Asking price sits in the {} percentile of recent listings in this sector.",
                self.rng.gen_range(20..=90u32)
            ),
            AnalysisKind::DealReadiness => format!(
                "Deal readiness score {} / 100; outstanding items are diligence follow-ups.",
                self.rng.gen_range(45..=95u32)
            ),
        }
    }
}

impl Default for DatasetGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a dataset for `profile` with an entropy-seeded generator.
pub fn generate(profile: &VolumeSpec, settings: &DemoSettings) -> Result<DemoDataset> {
    DatasetGenerator::new().generate(profile, settings)
}

fn anchor_for(settings: &DemoSettings) -> DateTime<Utc> {
    if settings.simulate_real_time {
        Utc::now()
    } else {
        canonical_anchor()
    }
}

/// The fixed instant used when timestamps are not anchored to "now".
pub fn canonical_anchor() -> DateTime<Utc> {
    Utc.timestamp_opt(CANONICAL_ANCHOR_SECS, 0).single().unwrap_or_else(Utc::now)
}
