//! Core library for comparing construction offers against quotation templates.
//!
//! This crate provides:
//! - Line item extraction from OCR text (table layout and line patterns)
//! - Quotation template parsing and flattening
//! - Composite string similarity with synonym and numeric boosts
//! - Greedy line matching into matches, similar pairs, missing and additional lines
//! - A file-level pipeline behind a pluggable text source

pub mod error;
pub mod extract;
pub mod matching;
pub mod models;
pub mod pipeline;
pub mod similarity;
pub mod source;
pub mod template;

pub use error::{ExtractionError, OfferMatchError, PdfError, Result};
pub use extract::{PositionExtractor, parse_amount};
pub use matching::MatchingEngine;
pub use models::{
    ComparisonResult, ComparisonSummary, Document, LineItem, MatchEntry, MatchOptions,
    OfferMatchConfig, SimilarEntry,
};
pub use pipeline::{ComparisonPipeline, ComparisonReport};
pub use similarity::{SimilarityScorer, SynonymGlossary, SynonymGroup};
pub use source::{FileTextSource, TextSource};
pub use template::{TemplateDocumentParser, flatten_items};

/// Extract line items from offer text.
pub fn extract_positions(text: &str) -> Vec<LineItem> {
    PositionExtractor::new().extract(text)
}

/// Parse quotation template text.
pub fn parse_template_document(text: &str) -> Document {
    TemplateDocumentParser::new().parse(text)
}

/// One descriptive line per template position.
pub fn flatten_document(document: &Document) -> Vec<String> {
    template::flatten_document(document)
}

/// Compare two texts line by line with the construction glossary.
/// Default options are used when `options` is `None`.
pub fn compare(source: &str, target: &str, options: Option<&MatchOptions>) -> ComparisonResult {
    let options = options.copied().unwrap_or_default();
    MatchingEngine::default().compare(source, target, &options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_facade_round_trip() {
        let doc = parse_template_document("Offer\nPOSITIONS\n1. Excavation\nQuantity: 50 m³\nPrice: 1750.00 EUR");
        let items = extract_positions("1  Excavation  50 m³  1750.00 €");

        let template_lines = flatten_document(&doc).join("\n");
        let offer_lines = flatten_items(&items, "EUR").join("\n");

        let result = compare(&offer_lines, &template_lines, None);
        assert_eq!(result.summary.match_count, 1);
        assert!(result.is_exact());
    }

    #[test]
    fn test_compare_empty_source() {
        let result = compare("", "Item A", None);
        assert_eq!(result.additional, vec!["Item A".to_string()]);
        assert_eq!(result.summary.additional_count, 1);
    }

    #[test]
    fn test_compare_with_options() {
        let strict = MatchOptions::default().with_match_threshold(1.0).with_similar_threshold(1.0);
        let result = compare("Concrete work", "Concrete works", Some(&strict));
        assert_eq!(result.missing, vec!["Concrete work".to_string()]);
        assert_eq!(result.additional, vec!["Concrete works".to_string()]);
    }
}
