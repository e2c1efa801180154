//! Comparison result models.
//!
//! Field names are part of the response contract consumed by the upload
//! layer and must not change.

use serde::{Deserialize, Serialize};

/// A source line paired with a target line at or above the match threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEntry {
    pub source: String,
    pub target: String,
    /// Similarity in percent, rounded.
    pub confidence: u32,
}

/// A source line paired with a target line between the two thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarEntry {
    pub source: String,
    pub target: String,
    /// Raw similarity in [0, 1].
    pub similarity: f64,
    /// Similarity in percent, rounded.
    pub confidence: u32,
}

/// Counts of each result category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    /// Non-blank lines on the source (offer) side.
    pub total_pdf_items: usize,
    /// Non-blank lines on the target (template) side.
    pub total_hero_items: usize,
    pub match_count: usize,
    pub similar_count: usize,
    pub missing_count: usize,
    pub additional_count: usize,
}

/// Outcome of comparing two line sequences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub matches: Vec<MatchEntry>,
    pub similar: Vec<SimilarEntry>,
    /// Source lines without an acceptable partner.
    pub missing: Vec<String>,
    /// Target lines never consumed by a source line.
    pub additional: Vec<String>,
    pub summary: ComparisonSummary,
}

impl ComparisonResult {
    /// True when every source line matched and nothing is left over.
    pub fn is_exact(&self) -> bool {
        self.similar.is_empty() && self.missing.is_empty() && self.additional.is_empty()
    }
}

/// Convert a similarity in [0, 1] to a rounded percentage.
pub fn confidence_percent(similarity: f64) -> u32 {
    (similarity * 100.0).round().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_percent() {
        assert_eq!(confidence_percent(1.0), 100);
        assert_eq!(confidence_percent(0.904), 90);
        assert_eq!(confidence_percent(0.605), 61);
        assert_eq!(confidence_percent(0.0), 0);
    }

    #[test]
    fn test_summary_json_field_names() {
        let result = ComparisonResult {
            summary: ComparisonSummary {
                total_pdf_items: 3,
                total_hero_items: 2,
                match_count: 1,
                similar_count: 1,
                missing_count: 1,
                additional_count: 0,
            },
            ..ComparisonResult::default()
        };

        let json = serde_json::to_value(&result).unwrap();
        for key in ["matches", "similar", "missing", "additional", "summary"] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
        let summary = &json["summary"];
        assert_eq!(summary["totalPdfItems"], 3);
        assert_eq!(summary["totalHeroItems"], 2);
        assert_eq!(summary["matchCount"], 1);
        assert_eq!(summary["similarCount"], 1);
        assert_eq!(summary["missingCount"], 1);
        assert_eq!(summary["additionalCount"], 0);
    }
}
