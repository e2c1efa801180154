//! Line item extraction from raw offer text.

pub mod amounts;
mod lines;
pub(crate) mod partial;
pub mod patterns;
mod table;

pub use amounts::{find_amount, parse_amount};

use tracing::debug;

use crate::models::LineItem;

/// Turns OCR text into line items.
///
/// A whitespace-column table reading is tried first. When it yields nothing,
/// the text is scanned line by line for position headers, quantities and
/// prices.
#[derive(Debug, Clone)]
pub struct PositionExtractor {
    /// Whether to try the table reading before the line scan.
    detect_tables: bool,
}

impl PositionExtractor {
    /// Create a new extractor with table detection enabled.
    pub fn new() -> Self {
        Self {
            detect_tables: true,
        }
    }

    /// Set table detection.
    pub fn with_table_detection(mut self, enabled: bool) -> Self {
        self.detect_tables = enabled;
        self
    }

    /// Extract line items in document order.
    pub fn extract(&self, text: &str) -> Vec<LineItem> {
        if self.detect_tables {
            let items = table::extract_items(text);
            if !items.is_empty() {
                debug!("Extracted {} items from table layout", items.len());
                return items;
            }
        }

        let items = lines::extract_items(text);
        debug!("Extracted {} items from line patterns", items.len());
        items
    }
}

impl Default for PositionExtractor {
    fn default() -> Self {
        Self::new()
    }
}
