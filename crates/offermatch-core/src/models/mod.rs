//! Data models: line items, documents, comparison results and configuration.

pub mod comparison;
pub mod config;
pub mod document;

pub use comparison::{ComparisonResult, ComparisonSummary, MatchEntry, SimilarEntry};
pub use config::{ExtractionConfig, LimitsConfig, MatchOptions, OfferMatchConfig};
pub use document::{Document, LineItem};
