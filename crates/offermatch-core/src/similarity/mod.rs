//! Composite text similarity for item descriptions.
//!
//! A score combines three independent signals on the two strings:
//! - edit distance (typos, OCR noise)
//! - token overlap (reordered or extra words)
//! - character bigram overlap (split or merged words)
//!
//! and two optional flat boosts: one when both strings name the same glossary
//! concept, one when both carry the same numbers (quantities, prices).

mod glossary;
pub mod numbers;

pub use glossary::{SynonymGlossary, SynonymGroup};

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::MatchOptions;

/// Weight of the edit distance score in the base composite.
pub const EDIT_WEIGHT: f64 = 0.4;
/// Weight of the token score in the base composite.
pub const TOKEN_WEIGHT: f64 = 0.4;
/// Weight of the bigram score in the base composite.
pub const BIGRAM_WEIGHT: f64 = 0.2;
/// Added when both strings mention the same glossary group.
pub const SYNONYM_BOOST: f64 = 0.15;
/// Added when more than half of the numbers pair up.
pub const NUMERIC_BOOST: f64 = 0.10;

/// Individual signals behind a similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityBreakdown {
    pub edit: f64,
    pub token: f64,
    pub bigram: f64,
    pub synonym_boost: f64,
    pub numeric_boost: f64,
    /// Final score in [0, 1].
    pub score: f64,
}

impl SimilarityBreakdown {
    fn identical() -> Self {
        Self {
            edit: 1.0,
            token: 1.0,
            bigram: 1.0,
            synonym_boost: 0.0,
            numeric_boost: 0.0,
            score: 1.0,
        }
    }

    /// Weighted composite before boosts.
    pub fn base(&self) -> f64 {
        EDIT_WEIGHT * self.edit + TOKEN_WEIGHT * self.token + BIGRAM_WEIGHT * self.bigram
    }
}

/// Scores pairs of strings. Cheap to clone; the glossary is shared.
#[derive(Debug, Clone)]
pub struct SimilarityScorer {
    glossary: Arc<SynonymGlossary>,
    use_synonyms: bool,
    use_numeric_boost: bool,
}

impl SimilarityScorer {
    /// Create a scorer over a shared glossary with both boosts enabled.
    pub fn new(glossary: Arc<SynonymGlossary>) -> Self {
        Self {
            glossary,
            use_synonyms: true,
            use_numeric_boost: true,
        }
    }

    /// Enable or disable the synonym boost.
    pub fn with_synonyms(mut self, enabled: bool) -> Self {
        self.use_synonyms = enabled;
        self
    }

    /// Enable or disable the numeric boost.
    pub fn with_numeric_boost(mut self, enabled: bool) -> Self {
        self.use_numeric_boost = enabled;
        self
    }

    /// Apply the boost toggles of a set of match options.
    pub fn with_options(self, options: &MatchOptions) -> Self {
        self.with_synonyms(options.use_synonyms)
            .with_numeric_boost(options.use_numeric_boost)
    }

    /// Similarity of two strings in [0, 1].
    pub fn score(&self, a: &str, b: &str) -> f64 {
        self.breakdown(a, b).score
    }

    /// Similarity of two strings with every contributing signal.
    pub fn breakdown(&self, a: &str, b: &str) -> SimilarityBreakdown {
        let na = normalize(a);
        let nb = normalize(b);

        if na == nb {
            return SimilarityBreakdown::identical();
        }

        let edit = edit_similarity(a, b);
        let token = token_similarity(&na, &nb);
        let bigram = bigram_similarity(&na, &nb);

        let synonym_boost = if self.use_synonyms && self.glossary.shared_group(&na, &nb).is_some() {
            SYNONYM_BOOST
        } else {
            0.0
        };

        let numeric_boost = if self.use_numeric_boost && numbers_agree(&na, &nb) {
            NUMERIC_BOOST
        } else {
            0.0
        };

        let mut breakdown = SimilarityBreakdown {
            edit,
            token,
            bigram,
            synonym_boost,
            numeric_boost,
            score: 0.0,
        };
        breakdown.score = (breakdown.base() + synonym_boost + numeric_boost).min(1.0);
        breakdown
    }
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new(Arc::new(SynonymGlossary::construction()))
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// `(maxLen - levenshtein) / maxLen`, compared case-insensitively.
///
/// Lengths are character counts of the strings as given; two empty strings
/// are identical.
pub fn edit_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = strsim::levenshtein(&a.to_lowercase(), &b.to_lowercase());
    max_len.saturating_sub(distance) as f64 / max_len as f64
}

/// Jaccard index of whitespace-delimited token sets.
pub fn token_similarity(a: &str, b: &str) -> f64 {
    let tokens_a: HashSet<&str> = a.split_whitespace().collect();
    let tokens_b: HashSet<&str> = b.split_whitespace().collect();
    jaccard(&tokens_a, &tokens_b)
}

/// Jaccard index of character bigram sets.
pub fn bigram_similarity(a: &str, b: &str) -> f64 {
    jaccard(&bigrams(a), &bigrams(b))
}

fn bigrams(s: &str) -> HashSet<(char, char)> {
    let chars: Vec<char> = s.chars().collect();
    chars.windows(2).map(|w| (w[0], w[1])).collect()
}

fn jaccard<T: Eq + std::hash::Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

fn numbers_agree(a: &str, b: &str) -> bool {
    let tokens_a = numbers::numeric_tokens(a);
    let tokens_b = numbers::numeric_tokens(b);
    numbers::matched_ratio(&tokens_a, &tokens_b).is_some_and(|ratio| ratio > 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn scorer() -> SimilarityScorer {
        SimilarityScorer::default()
    }

    #[test]
    fn test_identical_after_normalization() {
        assert_eq!(scorer().score("Excavation", "  EXCAVATION "), 1.0);
        assert_eq!(scorer().score("", ""), 1.0);
        assert_eq!(scorer().score("   ", ""), 1.0);
    }

    #[test]
    fn test_score_in_range() {
        let pairs = [
            ("Excavation 50 m³", "Concrete 12 m³"),
            ("a", "completely different text"),
            ("", "Item A"),
            ("Earthworks 100 m³ 2500,00 EUR", "excavation 100 m³ 2500.00 EUR"),
        ];
        for (a, b) in pairs {
            let s = scorer().score(a, b);
            assert!((0.0..=1.0).contains(&s), "{a} / {b} scored {s}");
        }
    }

    #[test]
    fn test_symmetric_without_boosts() {
        let s = scorer().with_synonyms(false).with_numeric_boost(false);
        let a = "Excavation of building pit";
        let b = "Excavation building pit, incl. removal";
        assert!((s.score(a, b) - s.score(b, a)).abs() < EPS);
    }

    #[test]
    fn test_edit_similarity() {
        assert_eq!(edit_similarity("", ""), 1.0);
        assert_eq!(edit_similarity("abc", ""), 0.0);
        assert!((edit_similarity("Kitten", "sitting") - 4.0 / 7.0).abs() < EPS);
        assert_eq!(edit_similarity("ABC", "abc"), 1.0);
    }

    #[test]
    fn test_token_similarity() {
        assert!((token_similarity("concrete wall 20 cm", "concrete wall") - 0.5).abs() < EPS);
        assert_eq!(token_similarity("", ""), 0.0);
    }

    #[test]
    fn test_bigram_similarity() {
        assert_eq!(bigram_similarity("ab", "ab"), 1.0);
        assert_eq!(bigram_similarity("a", "b"), 0.0);
        // {ab, bc} vs {ab, bd}
        assert!((bigram_similarity("abc", "abd") - 1.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn test_synonym_toggle() {
        let a = "excavation works, 50 m³";
        let b = "ground-moving, 50 m³";

        let with = scorer().with_synonyms(true).breakdown(a, b);
        let without = scorer().with_synonyms(false).breakdown(a, b);

        assert_eq!(with.synonym_boost, SYNONYM_BOOST);
        assert_eq!(without.synonym_boost, 0.0);
        assert!(with.score - without.score >= SYNONYM_BOOST - EPS);
    }

    #[test]
    fn test_numeric_toggle() {
        let a = "Quantity: 50 m³";
        let b = "50 m³, flat rate";

        let with = scorer().with_numeric_boost(true).score(a, b);
        let without = scorer().with_numeric_boost(false).score(a, b);

        assert!(with > without);
        assert!(with - without <= NUMERIC_BOOST + EPS);
    }

    #[test]
    fn test_numeric_boost_requires_numbers_on_both_sides() {
        let b = scorer().breakdown("Excavation 50 m³", "Excavation of pit");
        assert_eq!(b.numeric_boost, 0.0);
    }

    #[test]
    fn test_numeric_boost_accepts_both_separators() {
        let b = scorer().breakdown("Concrete 1750,00 EUR", "Concreting 1750.00 EUR");
        assert_eq!(b.numeric_boost, NUMERIC_BOOST);
    }

    #[test]
    fn test_empty_glossary_never_boosts() {
        let s = SimilarityScorer::new(Arc::new(SynonymGlossary::new()));
        let b = s.breakdown("excavation works", "ground-moving");
        assert_eq!(b.synonym_boost, 0.0);
    }

    #[test]
    fn test_score_capped_at_one() {
        let b = scorer().breakdown("Excavation 50 m³ 1750.00", "excavation, 50 m³ 1750.00");
        assert!(b.base() + b.synonym_boost + b.numeric_boost > 1.0);
        assert_eq!(b.score, 1.0);
    }
}
