pub mod dataset;
pub mod types;

pub use dataset::{Dataset, ReportMetadata, ScorePolicy};
pub use types::{Confidence, Contact, ContactKind, DiscoveryInfo, DiscoveryRecord, Quality, Repository};
