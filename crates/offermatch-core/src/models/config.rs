//! Configuration structures for the comparison pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{OfferMatchError, Result};
use crate::similarity::SynonymGlossary;

/// Main configuration for offermatch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferMatchConfig {
    /// Matching thresholds and scoring toggles.
    pub matching: MatchOptions,

    /// Text extraction configuration.
    pub extraction: ExtractionConfig,

    /// Input size limits.
    pub limits: LimitsConfig,

    /// Synonym glossary override. The construction glossary is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glossary: Option<SynonymGlossary>,
}

/// Options for a single comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Minimum similarity for a match (0.0 - 1.0).
    pub match_threshold: f64,

    /// Minimum similarity for a similar pair (0.0 - 1.0).
    pub similar_threshold: f64,

    /// Add the synonym boost when both lines name the same glossary concept.
    pub use_synonyms: bool,

    /// Add the numeric boost when both lines carry the same numbers.
    pub use_numeric_boost: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            match_threshold: 0.90,
            similar_threshold: 0.60,
            use_synonyms: true,
            use_numeric_boost: true,
        }
    }
}

impl MatchOptions {
    pub fn with_match_threshold(mut self, threshold: f64) -> Self {
        self.match_threshold = threshold;
        self
    }

    pub fn with_similar_threshold(mut self, threshold: f64) -> Self {
        self.similar_threshold = threshold;
        self
    }

    pub fn with_synonyms(mut self, enabled: bool) -> Self {
        self.use_synonyms = enabled;
        self
    }

    pub fn with_numeric_boost(mut self, enabled: bool) -> Self {
        self.use_numeric_boost = enabled;
        self
    }

    /// Check the thresholds are ordered and inside [0, 1].
    pub fn validate(&self) -> Result<()> {
        let in_range = |t: f64| (0.0..=1.0).contains(&t);
        if !in_range(self.match_threshold) || !in_range(self.similar_threshold) {
            return Err(OfferMatchError::Config(
                "thresholds must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.similar_threshold > self.match_threshold {
            return Err(OfferMatchError::Config(format!(
                "similar_threshold ({}) exceeds match_threshold ({})",
                self.similar_threshold, self.match_threshold
            )));
        }
        Ok(())
    }
}

/// Text extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Language hint handed to the text source.
    pub language: String,

    /// Currency marker appended to prices when items are flattened.
    pub currency_marker: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            language: "deu".to_string(),
            currency_marker: "EUR".to_string(),
        }
    }
}

/// Input size limits. Matching cost grows with the product of both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum flattened items per side (0 = unlimited).
    pub max_items: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self { max_items: 500 }
    }
}

impl OfferMatchConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| OfferMatchError::Config(format!("{}: {}", path.display(), e)))?;
        config.matching.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| OfferMatchError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The glossary to score with: the configured one, or the construction default.
    pub fn glossary(&self) -> SynonymGlossary {
        self.glossary
            .clone()
            .unwrap_or_else(SynonymGlossary::construction)
    }
}
