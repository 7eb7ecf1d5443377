//! Demo data engine: synthetic sandbox content for the marketplace.
//!
//! The pieces compose leaves-first: [`profile`] maps a density tier to
//! generation volumes, [`generator`] turns volumes into a [`DemoDataset`],
//! [`stats`] derives counters from a dataset and [`integrity`] checks that
//! every cross-reference resolves. [`session`] holds the state the session
//! store persists.

pub mod generator;
pub mod integrity;
pub mod profile;
pub mod records;
pub mod session;
pub mod settings;
pub mod stats;

pub use generator::{generate, DatasetGenerator};
pub use profile::{profile_for, VolumeSpec};
pub use records::{
    AiAnalysis, AnalysisKind, Buyer, Deal, DealStage, DemoDataset, Document, DocumentKind, Match, Message,
    Seller, SubjectRef,
};
pub use session::DemoSession;
pub use settings::DemoSettings;
pub use stats::{aggregate, DemoStats};
