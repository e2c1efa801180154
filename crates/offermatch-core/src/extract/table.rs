//! Whitespace-column table detection.
//!
//! OCR engines usually render table rows as one line with wide gaps between
//! the columns. A row is any line that splits into two or more cells on runs
//! of two or more whitespace characters.

use tracing::trace;

use crate::models::LineItem;

use super::amounts::{find_amount, valid_amount};
use super::patterns::{CELL_SEPARATOR, HEADER_KEYWORDS, INTEGER, QUANTITY_CELL};

/// A cell in a detected table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TableCell {
    /// Cell text, trimmed.
    pub content: String,
    /// Column index (0-based).
    pub column: usize,
}

/// A detected table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TableRow {
    pub cells: Vec<TableCell>,
    /// Whether the first cell is a column label or a summary label.
    pub is_header: bool,
}

impl TableRow {
    /// Split a line into cells; `None` unless it has at least two.
    pub fn parse(line: &str) -> Option<Self> {
        let cells: Vec<TableCell> = CELL_SEPARATOR
            .split(line.trim())
            .filter(|c| !c.is_empty())
            .enumerate()
            .map(|(column, content)| TableCell {
                content: content.to_string(),
                column,
            })
            .collect();

        if cells.len() < 2 {
            return None;
        }

        let is_header = is_header_label(&cells[0].content);
        Some(Self { cells, is_header })
    }

    fn cell(&self, column: usize) -> Option<&str> {
        self.cells
            .iter()
            .find(|c| c.column == column)
            .map(|c| c.content.as_str())
    }

    /// Map columns to item fields by position:
    /// 0 number, 1 description, 2 quantity and unit, last (from the fourth on) price.
    pub fn to_item(&self) -> Option<LineItem> {
        let description = self.cell(1)?.trim();
        if description.is_empty() {
            return None;
        }

        let mut item = LineItem::new(description);
        item.number = self
            .cell(0)
            .and_then(|c| INTEGER.find(c))
            .map(|m| m.as_str().to_string());

        if let Some(caps) = self.cell(2).and_then(|c| QUANTITY_CELL.captures(c)) {
            if let Some(quantity) = valid_amount(&caps[1]) {
                item.quantity = Some(quantity);
                item.unit = caps
                    .get(2)
                    .map(|u| u.as_str().trim())
                    .filter(|u| !u.is_empty())
                    .map(str::to_string);
            }
        }

        let last = self.cells.len() - 1;
        if last >= 3 {
            item.price = self.cell(last).and_then(find_amount);
        }

        Some(item)
    }
}

fn is_header_label(cell: &str) -> bool {
    let cell = cell.trim().to_lowercase();
    HEADER_KEYWORDS.iter().any(|kw| cell.starts_with(kw))
}

/// All table rows in the text, header rows included.
pub(crate) fn detect_rows(text: &str) -> Vec<TableRow> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(TableRow::parse)
        .collect()
}

/// Items from data rows; empty when the text has no usable table.
pub(crate) fn extract_items(text: &str) -> Vec<LineItem> {
    detect_rows(text)
        .into_iter()
        .filter(|row| {
            if row.is_header {
                trace!("Skipping header row: {:?}", row.cells.first().map(|c| &c.content));
            }
            !row.is_header
        })
        .filter_map(|row| row.to_item())
        .collect()
}
