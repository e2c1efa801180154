//! End-to-end comparison of an offer against a quotation template.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{OfferMatchError, Result};
use crate::extract::PositionExtractor;
use crate::matching::MatchingEngine;
use crate::models::{ComparisonResult, Document, LineItem, OfferMatchConfig};
use crate::source::TextSource;
use crate::template::{TemplateDocumentParser, flatten_items};

/// Everything produced by one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub result: ComparisonResult,
    /// Items extracted from the offer text.
    pub offer_items: Vec<LineItem>,
    /// The parsed template.
    pub template: Document,
}

/// Extracts, parses, flattens and compares.
#[derive(Debug, Clone)]
pub struct ComparisonPipeline {
    extractor: PositionExtractor,
    parser: TemplateDocumentParser,
    engine: MatchingEngine,
    config: OfferMatchConfig,
}

impl ComparisonPipeline {
    pub fn new(config: OfferMatchConfig) -> Self {
        let glossary = Arc::new(config.glossary());
        Self {
            extractor: PositionExtractor::new(),
            parser: TemplateDocumentParser::new(),
            engine: MatchingEngine::new(glossary),
            config,
        }
    }

    pub fn config(&self) -> &OfferMatchConfig {
        &self.config
    }

    /// Compare raw offer text against raw template text.
    pub fn compare_documents(&self, offer_text: &str, template_text: &str) -> Result<ComparisonReport> {
        let offer_items = self.extractor.extract(offer_text);
        let template = self.parser.parse(template_text);

        let limit = self.config.limits.max_items;
        check_limit("offer", offer_items.len(), limit)?;
        check_limit("template", template.len(), limit)?;

        let marker = &self.config.extraction.currency_marker;
        let offer_lines = flatten_items(&offer_items, marker);
        let template_lines = flatten_items(&template.positions, marker);

        let result = self
            .engine
            .compare_lines(&offer_lines, &template_lines, &self.config.matching);

        Ok(ComparisonReport {
            result,
            offer_items,
            template,
        })
    }

    /// Read both files through `source`, then compare them.
    pub fn compare_files(
        &self,
        source: &dyn TextSource,
        offer_path: &Path,
        template_path: &Path,
    ) -> Result<ComparisonReport> {
        let language = &self.config.extraction.language;
        let offer_text = source.extract_text(offer_path, language)?;
        let template_text = source.extract_text(template_path, language)?;

        let report = self.compare_documents(&offer_text, &template_text)?;
        info!(
            "Compared {} against {}: {} matches, {} similar, {} missing, {} additional",
            offer_path.display(),
            template_path.display(),
            report.result.summary.match_count,
            report.result.summary.similar_count,
            report.result.summary.missing_count,
            report.result.summary.additional_count
        );
        Ok(report)
    }
}

impl Default for ComparisonPipeline {
    fn default() -> Self {
        Self::new(OfferMatchConfig::default())
    }
}

fn check_limit(side: &'static str, items: usize, limit: usize) -> Result<()> {
    if limit > 0 && items > limit {
        return Err(OfferMatchError::InputTooLarge { side, items, limit });
    }
    Ok(())
}
