//! Greedy line matching between an offer and a template.
//!
//! Each source line is committed to its best unconsumed target line in
//! source order. Earlier decisions are never revisited, so the outcome
//! depends on line order when several source lines compete for one target.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::models::comparison::confidence_percent;
use crate::models::{ComparisonResult, ComparisonSummary, MatchEntry, MatchOptions, SimilarEntry};
use crate::similarity::{SimilarityScorer, SynonymGlossary};

/// Compares line sequences using a shared synonym glossary.
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    glossary: Arc<SynonymGlossary>,
}

impl MatchingEngine {
    pub fn new(glossary: Arc<SynonymGlossary>) -> Self {
        Self { glossary }
    }

    /// Compare two texts line by line.
    pub fn compare(&self, source: &str, target: &str, options: &MatchOptions) -> ComparisonResult {
        let source_lines: Vec<&str> = source.lines().collect();
        let target_lines: Vec<&str> = target.lines().collect();
        self.compare_lines(&source_lines, &target_lines, options)
    }

    /// Compare two already split line sequences. Every line is trimmed and
    /// blank lines are dropped before matching, so they never show up as
    /// missing or additional and never count towards the summary totals.
    pub fn compare_lines<S: AsRef<str>, T: AsRef<str>>(
        &self,
        source: &[S],
        target: &[T],
        options: &MatchOptions,
    ) -> ComparisonResult {
        let source = non_blank(source);
        let target = non_blank(target);
        let scorer = SimilarityScorer::new(Arc::clone(&self.glossary)).with_options(options);
        let mut consumed = vec![false; target.len()];
        let mut result = ComparisonResult::default();

        for &line in &source {
            let Some((index, score)) = best_candidate(&scorer, line, &target, &consumed) else {
                trace!("No target left for {:?}", line);
                result.missing.push(line.to_string());
                continue;
            };

            let partner = target[index];
            if score >= options.match_threshold {
                trace!("Match {:?} -> {:?} ({:.3})", line, partner, score);
                consumed[index] = true;
                result.matches.push(MatchEntry {
                    source: line.to_string(),
                    target: partner.to_string(),
                    confidence: confidence_percent(score),
                });
            } else if score >= options.similar_threshold {
                trace!("Similar {:?} -> {:?} ({:.3})", line, partner, score);
                consumed[index] = true;
                result.similar.push(SimilarEntry {
                    source: line.to_string(),
                    target: partner.to_string(),
                    similarity: score,
                    confidence: confidence_percent(score),
                });
            } else {
                trace!("Missing {:?}, best was {:?} ({:.3})", line, partner, score);
                result.missing.push(line.to_string());
            }
        }

        result.additional = target
            .iter()
            .zip(&consumed)
            .filter(|(_, used)| !**used)
            .map(|(line, _)| line.to_string())
            .collect();

        result.summary = ComparisonSummary {
            total_pdf_items: source.len(),
            total_hero_items: target.len(),
            match_count: result.matches.len(),
            similar_count: result.similar.len(),
            missing_count: result.missing.len(),
            additional_count: result.additional.len(),
        };

        debug!(
            "Compared {} source and {} target lines: {} matches, {} similar, {} missing, {} additional",
            source.len(),
            target.len(),
            result.summary.match_count,
            result.summary.similar_count,
            result.summary.missing_count,
            result.summary.additional_count
        );

        result
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new(Arc::new(SynonymGlossary::construction()))
    }
}

/// Highest scoring unconsumed target. Ties keep the lowest index.
fn best_candidate(
    scorer: &SimilarityScorer,
    line: &str,
    target: &[&str],
    consumed: &[bool],
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, candidate) in target.iter().enumerate() {
        if consumed[index] {
            continue;
        }
        let score = scorer.score(line, candidate);
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((index, score));
        }
    }
    best
}

fn non_blank<S: AsRef<str>>(lines: &[S]) -> Vec<&str> {
    lines
        .iter()
        .map(|l| l.as_ref().trim())
        .filter(|l| !l.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const OFFER: &str = "\
Excavation | 50 m³ | 1750.00 EUR
Concrete works foundation | 12 m³
Painting of interior walls
Scaffolding rental 4 weeks";

    const TEMPLATE: &str = "\
Excavation | 50 m³ | 1750.00 EUR
Concrete work foundation | 12 m³

Disposal of debris | 450,00 EUR";

    fn engine() -> MatchingEngine {
        MatchingEngine::default()
    }

    #[test]
    fn test_empty_source() {
        let result = engine().compare("", "Item A", &MatchOptions::default());
        assert!(result.matches.is_empty());
        assert!(result.similar.is_empty());
        assert!(result.missing.is_empty());
        assert_eq!(result.additional, vec!["Item A".to_string()]);
        assert_eq!(result.summary.total_pdf_items, 0);
        assert_eq!(result.summary.total_hero_items, 1);
    }

    #[test]
    fn test_empty_target() {
        let result = engine().compare("Item A\n\n  Item B ", "", &MatchOptions::default());
        assert_eq!(result.missing, vec!["Item A".to_string(), "Item B".to_string()]);
        assert!(result.additional.is_empty());
    }

    #[test]
    fn test_self_comparison() {
        let result = engine().compare(OFFER, OFFER, &MatchOptions::default());
        assert!(result.missing.is_empty());
        assert!(result.additional.is_empty());
        assert!(result.similar.is_empty());
        assert_eq!(result.matches.len(), 4);
        for entry in &result.matches {
            assert_eq!(entry.source, entry.target);
            assert_eq!(entry.confidence, 100);
        }
        assert!(result.is_exact());
    }

    #[test]
    fn test_partition() {
        let result = engine().compare(OFFER, TEMPLATE, &MatchOptions::default());
        let template_lines: Vec<&str> = TEMPLATE.lines().collect();
        let offer_lines: Vec<&str> = OFFER.lines().collect();
        let targets = non_blank(&template_lines);
        let sources = non_blank(&offer_lines);

        let mut used: Vec<&str> = result
            .matches
            .iter()
            .map(|m| m.target.as_str())
            .chain(result.similar.iter().map(|s| s.target.as_str()))
            .chain(result.additional.iter().map(String::as_str))
            .collect();
        used.sort_unstable();
        let mut expected = targets.clone();
        expected.sort_unstable();
        assert_eq!(used, expected);

        let summary = result.summary;
        assert_eq!(
            summary.match_count + summary.similar_count + summary.missing_count,
            sources.len()
        );
        assert_eq!(summary.total_hero_items, 3);
    }

    #[test]
    fn test_offer_against_template() {
        let result = engine().compare(OFFER, TEMPLATE, &MatchOptions::default());

        assert_eq!(result.matches[0].target, "Excavation | 50 m³ | 1750.00 EUR");
        assert_eq!(result.matches[0].confidence, 100);
        assert!(result.missing.contains(&"Painting of interior walls".to_string()));
        assert!(result.additional.contains(&"Disposal of debris | 450,00 EUR".to_string()));

        let concrete = result
            .matches
            .iter()
            .map(|m| m.source.as_str())
            .chain(result.similar.iter().map(|s| s.source.as_str()))
            .any(|s| s.starts_with("Concrete"));
        assert!(concrete);
    }

    #[test]
    fn test_raising_match_threshold() {
        let options = MatchOptions::default();
        let loose = engine().compare(OFFER, TEMPLATE, &options.with_match_threshold(0.60));
        let strict = engine().compare(OFFER, TEMPLATE, &options.with_match_threshold(1.0));

        assert!(strict.matches.len() <= loose.matches.len());
        assert_eq!(
            strict.matches.len() + strict.similar.len(),
            loose.matches.len() + loose.similar.len()
        );
        assert_eq!(strict.missing, loose.missing);
    }

    #[test]
    fn test_raising_similar_threshold() {
        let options = MatchOptions::default().with_similar_threshold(0.3);
        let loose = engine().compare(OFFER, TEMPLATE, &options);
        let strict = engine().compare(OFFER, TEMPLATE, &options.with_similar_threshold(0.9));

        assert!(strict.similar.len() <= loose.similar.len());
        assert!(strict.missing.len() >= loose.missing.len());
        assert_eq!(strict.matches.len(), loose.matches.len());
    }

    #[test]
    fn test_greedy_first_come_first_served() {
        let options = MatchOptions::default();

        let result = engine().compare("Concrete works\nConcrete work", "Concrete works", &options);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.missing, vec!["Concrete work".to_string()]);

        let result = engine().compare("Concrete work\nConcrete works", "Concrete works", &options);
        assert!(result.matches.is_empty());
        assert_eq!(result.similar.len(), 1);
        assert_eq!(result.similar[0].source, "Concrete work");
        assert_eq!(result.missing, vec!["Concrete works".to_string()]);
    }

    #[test]
    fn test_ties_keep_first_target() {
        let result = engine().compare("Tiling", "Tiling\nTiling", &MatchOptions::default());
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.additional, vec!["Tiling".to_string()]);
        assert_eq!(result.summary.additional_count, 1);
    }

    #[test]
    fn test_compare_lines_with_owned_strings() {
        let source = vec!["Roofing".to_string()];
        let target = vec!["Roofing"];
        let result = engine().compare_lines(&source, &target, &MatchOptions::default());
        assert_eq!(result.matches.len(), 1);
    }

    #[test]
    fn test_compare_lines_drops_blank_and_padded_lines() {
        let source = ["  Roofing ", "", "   "];
        let target = ["Roofing", " "];
        let result = engine().compare_lines(&source, &target, &MatchOptions::default());

        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].source, "Roofing");
        assert_eq!(result.matches[0].target, "Roofing");
        assert!(result.missing.is_empty());
        assert!(result.additional.is_empty());
        assert_eq!(result.summary.total_pdf_items, 1);
        assert_eq!(result.summary.total_hero_items, 1);

        let empty: [&str; 0] = [];
        let result = engine().compare_lines(&["", "  "], &empty, &MatchOptions::default());
        assert!(result.missing.is_empty());
        assert_eq!(result.summary.total_pdf_items, 0);
    }
}
