//! Synthetic marketplace records.
//!
//! All cross-references are by identifier. A [`DemoDataset`] produced by the
//! generator never holds a reference that does not resolve inside the same
//! dataset; see [`crate::demo::integrity`] for the checker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A prospective acquirer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Buyer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub company: String,
    pub location: String,
    /// Lower bound of the acquisition budget, in whole dollars
    pub budget_min: u64,
    /// Upper bound of the acquisition budget, in whole dollars
    pub budget_max: u64,
    pub target_industries: Vec<String>,
    pub verified: bool,
    pub joined_at: DateTime<Utc>,
}

/// A business listed for sale and its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Seller {
    pub id: String,
    pub owner_name: String,
    pub business_name: String,
    pub industry: String,
    pub location: String,
    pub asking_price: u64,
    pub annual_revenue: u64,
    pub employees: u32,
    pub listed_at: DateTime<Utc>,
}

/// A pairing of a buyer with a business the matcher considers a fit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Match {
    pub id: String,
    pub buyer_id: String,
    pub seller_id: String,
    /// Compatibility score, 0-100
    pub score: u8,
    pub reasons: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Lifecycle stage of a deal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DealStage {
    Initial,
    Interested,
    Negotiation,
    Closing,
    Completed,
}

impl DealStage {
    /// Every stage in lifecycle order.
    pub const ALL: [DealStage; 5] = [
        DealStage::Initial,
        DealStage::Interested,
        DealStage::Negotiation,
        DealStage::Closing,
        DealStage::Completed,
    ];

    /// Any stage other than `Completed` counts as active.
    pub fn is_active(self) -> bool {
        self != DealStage::Completed
    }
}

/// A deal opened on a match.
///
/// `buyer_id` and `seller_id` repeat the match's parties so consumers can
/// render a deal without resolving the match first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Deal {
    pub id: String,
    pub match_id: String,
    pub buyer_id: String,
    pub seller_id: String,
    pub stage: DealStage,
    pub offer_amount: u64,
    pub opened_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A message exchanged between the parties of a deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Message {
    pub id: String,
    pub deal_id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub body: String,
    pub read: bool,
    pub sent_at: DateTime<Utc>,
}

/// The record a document or analysis is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum SubjectRef {
    /// A deal id
    Deal(String),
    /// A seller id; a seller's listing is the business
    Business(String),
}

impl SubjectRef {
    /// The referenced identifier.
    pub fn id(&self) -> &str {
        match self {
            SubjectRef::Deal(id) | SubjectRef::Business(id) => id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Nda,
    FinancialStatement,
    LetterOfIntent,
    DueDiligence,
    PurchaseAgreement,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 5] = [
        DocumentKind::Nda,
        DocumentKind::FinancialStatement,
        DocumentKind::LetterOfIntent,
        DocumentKind::DueDiligence,
        DocumentKind::PurchaseAgreement,
    ];

    /// Human-readable title prefix.
    pub fn title(self) -> &'static str {
        match self {
            DocumentKind::Nda => "Non-Disclosure Agreement",
            DocumentKind::FinancialStatement => "Financial Statements",
            DocumentKind::LetterOfIntent => "Letter of Intent",
            DocumentKind::DueDiligence => "Due Diligence Checklist",
            DocumentKind::PurchaseAgreement => "Purchase Agreement",
        }
    }
}

/// A document shared within a deal room or attached to a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Document {
    pub id: String,
    pub subject: SubjectRef,
    pub kind: DocumentKind,
    pub title: String,
    pub size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    Valuation,
    RiskAssessment,
    MarketComparison,
    DealReadiness,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 4] = [
        AnalysisKind::Valuation,
        AnalysisKind::RiskAssessment,
        AnalysisKind::MarketComparison,
        AnalysisKind::DealReadiness,
    ];
}

/// An AI-generated analysis of a deal or business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AiAnalysis {
    pub id: String,
    pub subject: SubjectRef,
    pub kind: AnalysisKind,
    pub summary: String,
    /// Model confidence, 0-100
    pub confidence: u8,
    pub generated_at: DateTime<Utc>,
}

/// The full synthetic sandbox content of a demo session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DemoDataset {
    pub buyers: Vec<Buyer>,
    pub sellers: Vec<Seller>,
    pub matches: Vec<Match>,
    pub deals: Vec<Deal>,
    pub messages: Vec<Message>,
    pub documents: Vec<Document>,
    pub analyses: Vec<AiAnalysis>,
}

impl DemoDataset {
    pub fn deal(&self, id: &str) -> Option<&Deal> {
        self.deals.iter().find(|d| d.id == id)
    }

    /// Number of deals currently in `stage`.
    pub fn deals_in_stage(&self, stage: DealStage) -> usize {
        self.deals.iter().filter(|d| d.stage == stage).count()
    }

    pub fn is_empty(&self) -> bool {
        self.buyers.is_empty()
            && self.sellers.is_empty()
            && self.matches.is_empty()
            && self.deals.is_empty()
            && self.messages.is_empty()
            && self.documents.is_empty()
            && self.analyses.is_empty()
    }
}
