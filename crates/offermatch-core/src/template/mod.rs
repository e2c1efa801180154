//! Quotation template parsing and flattening.
//!
//! Templates are exported from the internal quoting tool as plain text:
//!
//! ```text
//! Offer Müller Renovation
//! =======================
//! POSITIONS
//! 1. Excavation
//! Quantity: 50 m³
//! Price: 1750.00 EUR
//! Standard position
//! Total: 1750.00 EUR
//! ```

use tracing::debug;

use crate::extract::amounts::valid_amount;
use crate::extract::partial::PartialItem;
use crate::extract::patterns::{
    ANNOTATION, SECTION_MARKER, SUBTOTAL_PREFIXES, TEMPLATE_POSITION, TEMPLATE_PRICE,
    TEMPLATE_QUANTITY, TEMPLATE_SEPARATOR, TOTAL_AMOUNT,
};
use crate::models::{Document, LineItem};

/// Separator between the parts of a flattened item.
pub const FLATTEN_SEPARATOR: &str = " | ";

/// Currency marker appended to flattened prices.
pub const DEFAULT_CURRENCY_MARKER: &str = "EUR";

/// State carried from one template line to the next.
#[derive(Debug, Default)]
struct TemplateScan {
    title: Option<String>,
    total_amount: Option<String>,
    in_positions: bool,
    positions: Vec<LineItem>,
    current: Option<PartialItem>,
}

impl TemplateScan {
    fn step(mut self, line: &str) -> Self {
        if self.title.is_none() && !TEMPLATE_SEPARATOR.is_match(line) {
            self.title = Some(line.to_string());
            return self;
        }

        // Once open, the section stays open; later keyword lines are item content.
        if !self.in_positions && SECTION_MARKER.is_match(line) {
            self.in_positions = true;
            return self;
        }

        if self.in_positions {
            if let Some(caps) = TEMPLATE_POSITION.captures(line) {
                self.positions
                    .extend(self.current.take().and_then(PartialItem::seal));
                self.current = Some(PartialItem::open(Some(&caps[1]), &caps[2]));
                return self;
            }
        }

        if let Some(amount) = total_on_line(line) {
            if let Some(total) = valid_amount(amount) {
                self.total_amount = Some(total);
            }
            return self;
        }

        if !self.in_positions {
            return self;
        }

        self.current = self.current.take().map(|item| attach(item, line));
        self
    }

    fn finish(mut self) -> Document {
        self.positions
            .extend(self.current.take().and_then(PartialItem::seal));
        Document {
            title: self.title,
            positions: self.positions,
            total_amount: self.total_amount,
        }
    }
}

/// The raw amount of a total line. Subtotals are not totals.
fn total_on_line(line: &str) -> Option<&str> {
    let caps = TOTAL_AMOUNT.captures(line)?;
    let prefix = caps[1].trim_end_matches('-').to_lowercase();
    if SUBTOTAL_PREFIXES.iter().any(|p| prefix.ends_with(p)) {
        return None;
    }
    caps.get(2).map(|m| m.as_str())
}

/// Attach a quantity, price or annotation line to the open item.
fn attach(item: PartialItem, line: &str) -> PartialItem {
    if let Some(caps) = TEMPLATE_QUANTITY.captures(line) {
        return item.with_quantity(&caps[1], caps.get(2).map(|m| m.as_str()));
    }
    if let Some(caps) = TEMPLATE_PRICE.captures(line) {
        return item.with_price(&caps[1]);
    }
    if ANNOTATION.is_match(line) {
        return item.append_note(line);
    }
    item
}

/// Parser for quotation templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateDocumentParser;

impl TemplateDocumentParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse template text into a document.
    pub fn parse(&self, text: &str) -> Document {
        let document = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .fold(TemplateScan::default(), TemplateScan::step)
            .finish();

        debug!(
            "Parsed template {:?} with {} positions",
            document.title,
            document.positions.len()
        );
        document
    }
}

/// One descriptive line for an item: description, "quantity unit" when both
/// are known, "price <currency>" when a price is known.
pub fn flatten_item(item: &LineItem, currency_marker: &str) -> String {
    let mut parts = vec![item.description.clone()];
    if let (Some(quantity), Some(unit)) = (&item.quantity, &item.unit) {
        parts.push(format!("{quantity} {unit}"));
    }
    if let Some(price) = &item.price {
        parts.push(format!("{price} {currency_marker}"));
    }
    parts.join(FLATTEN_SEPARATOR)
}

/// Flatten a sequence of items, one line each.
pub fn flatten_items(items: &[LineItem], currency_marker: &str) -> Vec<String> {
    items
        .iter()
        .map(|item| flatten_item(item, currency_marker))
        .collect()
}

/// Flatten a document's positions, one line each.
pub fn flatten_document(document: &Document) -> Vec<String> {
    flatten_items(&document.positions, DEFAULT_CURRENCY_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TEMPLATE: &str = "
        ===========================
        Offer Müller Renovation
        ===========================
        Customer: Müller, Hauptstraße 5

        POSITIONS
        1. Excavation
        Quantity: 50 m³
        Price: 1750.00 EUR
        Standard position

        2. Concrete works foundation
        Quantity: 12 m³
        Unit price: 180,00 EUR
        Estimated, to be confirmed on site

        3. Disposal
        Price: 450,00 EUR

        Total: 2.200,00 EUR
    ";

    #[test]
    fn test_parse_template() {
        let doc = TemplateDocumentParser::new().parse(TEMPLATE);

        assert_eq!(doc.title.as_deref(), Some("Offer Müller Renovation"));
        assert_eq!(doc.total_amount.as_deref(), Some("2.200,00"));
        assert_eq!(doc.len(), 3);

        assert_eq!(
            doc.positions[0],
            LineItem::new("Excavation")
                .with_number("1")
                .with_quantity("50", Some("m³"))
                .with_price("1750.00")
                .with_notes("Standard position")
        );
        assert_eq!(doc.positions[1].price.as_deref(), Some("180,00"));
        assert_eq!(
            doc.positions[1].notes.as_deref(),
            Some("Estimated, to be confirmed on site")
        );
        assert_eq!(doc.positions[2].quantity, None);
    }

    #[test]
    fn test_lines_before_section_are_not_items() {
        let doc = TemplateDocumentParser::new().parse("Title\n1. Not an item\nITEMS\n2. Item");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.positions[0].number.as_deref(), Some("2"));
    }

    #[test]
    fn test_total_outside_positions() {
        let doc = TemplateDocumentParser::new().parse("Title\nSum: 99,50\nServices\n1. Painting");
        assert_eq!(doc.total_amount.as_deref(), Some("99,50"));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_section_heading_with_trailing_words() {
        let parser = TemplateDocumentParser::new();

        let doc = parser.parse("Offer Müller\nPOSITIONS (net prices)\n1. Excavation\nQuantity: 50 m³");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.positions[0].description, "Excavation");
        assert_eq!(doc.positions[0].quantity.as_deref(), Some("50"));

        let doc = parser.parse("Angebot\nPositionen und Preise\n1. Erdarbeiten\nPreis: 1.750,00 €");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.positions[0].price.as_deref(), Some("1.750,00"));
    }

    #[test]
    fn test_keyword_lines_inside_section_stay_items() {
        let doc = TemplateDocumentParser::new()
            .parse("Title\nITEMS\n1. Services for roof repair\nStandard position\n2. Scaffolding");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.positions[0].description, "Services for roof repair");
        assert_eq!(doc.positions[0].notes.as_deref(), Some("Standard position"));
    }

    #[test]
    fn test_compound_total_labels() {
        let parser = TemplateDocumentParser::new();

        let doc = parser.parse(
            "Angebot\nLEISTUNGEN\n1. Erdarbeiten\nPreis: 1.750,00 €\nGesamtsumme: 1.750,00 €",
        );
        assert_eq!(doc.total_amount.as_deref(), Some("1.750,00"));
        assert_eq!(doc.positions[0].price.as_deref(), Some("1.750,00"));

        let doc = parser.parse("Angebot\nLeistungen\n1. Erdarbeiten\nNettosumme: 900,00");
        assert_eq!(doc.total_amount.as_deref(), Some("900,00"));

        let doc = parser.parse(
            "Offer\nPOSITIONS\n1. Painting\nSubtotal: 500,00\nZwischensumme: 500,00\nTotal: 595,00",
        );
        assert_eq!(doc.total_amount.as_deref(), Some("595,00"));

        let doc = parser.parse("Offer\nPOSITIONS\n1. Painting\nSub-total: 500,00");
        assert_eq!(doc.total_amount, None);
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_german_template() {
        let doc = TemplateDocumentParser::new()
            .parse("Angebot\nLEISTUNGEN\n1. Erdarbeiten\nMenge: 50 m³\nPreis: 1.750,00 €\nGeschätzt\nSUMME: 1.750,00 €");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.positions[0].quantity.as_deref(), Some("50"));
        assert_eq!(doc.positions[0].price.as_deref(), Some("1.750,00"));
        assert_eq!(doc.positions[0].notes.as_deref(), Some("Geschätzt"));
        assert_eq!(doc.total_amount.as_deref(), Some("1.750,00"));
    }

    #[test]
    fn test_empty_template() {
        assert_eq!(TemplateDocumentParser::new().parse(""), Document::default());
        assert_eq!(TemplateDocumentParser::new().parse("---\n===").title, None);
    }

    #[test]
    fn test_flatten_document() {
        let doc = TemplateDocumentParser::new().parse(TEMPLATE);
        assert_eq!(
            flatten_document(&doc),
            vec![
                "Excavation | 50 m³ | 1750.00 EUR".to_string(),
                "Concrete works foundation | 12 m³ | 180,00 EUR".to_string(),
                "Disposal | 450,00 EUR".to_string(),
            ]
        );
    }

    #[test]
    fn test_flatten_requires_quantity_and_unit() {
        let item = LineItem::new("Cleaning").with_quantity("3", None);
        assert_eq!(flatten_item(&item, "EUR"), "Cleaning");
        assert_eq!(flatten_items(&[item.with_price("90")], "CHF"), vec!["Cleaning | 90 CHF"]);
    }
}
