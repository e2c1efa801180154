//! Common regex patterns for offer and template line recognition.
//!
//! Every pattern runs against a single trimmed line. English labels are
//! accepted alongside the German ones found on the templates.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Table layout: cells are separated by runs of two or more whitespace characters
    pub static ref CELL_SEPARATOR: Regex = Regex::new(r"\s{2,}").unwrap();

    pub static ref INTEGER: Regex = Regex::new(r"[0-9]+").unwrap();

    // Amount as printed: 1750.00, 1.750,00, 1 750,00, 50
    pub static ref AMOUNT_VALUE: Regex = Regex::new(
        r"[0-9]+(?:[.,][0-9]+|[ \u{00a0}][0-9]{3})*"
    ).unwrap();

    // Table cell holding quantity and unit: "50 m³", "2,5 h", "1 psch"
    pub static ref QUANTITY_CELL: Regex = Regex::new(
        r"^([0-9]+(?:[.,][0-9]+)?)\s*(.*)$"
    ).unwrap();

    // Position headers: "Position 3: ...", "Pos. 3 ...", "Pos 2.010 - ..."
    pub static ref POSITION_LABELED: Regex = Regex::new(
        r"(?i)^(?:position|pos\.?)\s*([0-9]+(?:\.[0-9]+)*)\s*[:.)\-]?\s*(.*)$"
    ).unwrap();

    // Position headers: "3. ..." or "2.010 ..."
    pub static ref POSITION_NUMBERED: Regex = Regex::new(
        r"^(?:([0-9]+\.[0-9]{3})\.?|([0-9]+)\.)\s+(\S.*)$"
    ).unwrap();

    pub static ref SUBTOTAL: Regex = Regex::new(
        r"(?i)^(?:subtotal|sub-total|zwischensumme)\s+[0-9]+"
    ).unwrap();

    // Quantity lines
    pub static ref QUANTITY_LABELED: Regex = Regex::new(
        r"(?i)^(?:quantity|qty\.?|menge|anzahl)\s*:\s*([0-9]+(?:[.,][0-9]+)?)\s*(\S+)?"
    ).unwrap();

    pub static ref QUANTITY_TIMES: Regex = Regex::new(
        r"(?i)^([0-9]+(?:[.,][0-9]+)?)\s*x(?:\s|$)"
    ).unwrap();

    pub static ref QUANTITY_FLAT_RATE: Regex = Regex::new(
        r"(?i)^([0-9]+(?:[.,][0-9]+)?)\s*(flat[- ]?rate|lump[- ]sum|pauschal|psch\.?)"
    ).unwrap();

    // Price lines
    pub static ref PRICE_LABELED: Regex = Regex::new(
        r"(?i)^(?:unit\s+price|total\s+price|price|einzelpreis|gesamtpreis|preis)\s*:\s*([0-9]+(?:[.,][0-9]+|[ \u{00a0}][0-9]{3})*)"
    ).unwrap();

    pub static ref PRICE_TIMES: Regex = Regex::new(
        r"(?i)^([0-9]+(?:[.,][0-9]+)?)\s*x\s*([0-9]+(?:[.,][0-9]+|[ \u{00a0}][0-9]{3})*)\s*(?:eur|€|usd|\$|chf|gbp|£)"
    ).unwrap();

    // Lines that never carry item content
    pub static ref BULLET: Regex = Regex::new(r"^[•·▪■◦‣\-–*]\s+").unwrap();

    pub static ref BENEFITS_MARKER: Regex = Regex::new(
        r"(?i)^(?:your\s+)?(?:benefits|advantages)\s*:?$|^(?:ihre\s+)?vorteile\s*:?$"
    ).unwrap();

    pub static ref SEPARATOR: Regex = Regex::new(r"^[-=_*]{3,}$").unwrap();

    // Template structure
    pub static ref TEMPLATE_SEPARATOR: Regex = Regex::new(r"^[-=]+$").unwrap();

    pub static ref SECTION_MARKER: Regex = Regex::new(
        r"(?i)\b(?:positions|positionen|items|services|leistungen)\b"
    ).unwrap();

    // Group 1 is whatever the label word carries before the keyword
    // ("Gesamt" in "Gesamtsumme", "Sub" in "Subtotal").
    pub static ref TOTAL_AMOUNT: Regex = Regex::new(
        r"(?i)([\p{L}-]*)(?:summe|gesamt|total|sum)\s*:\s*([0-9]+(?:[.,][0-9]+|[ \u{00a0}][0-9]{3})*)"
    ).unwrap();

    pub static ref TEMPLATE_POSITION: Regex = Regex::new(r"^([0-9]+)\.\s*(.+)$").unwrap();

    pub static ref TEMPLATE_QUANTITY: Regex = Regex::new(
        r"(?i)(?:quantity|qty|menge|anzahl)\s*:\s*([0-9]+(?:[.,][0-9]+)?)\s*(\S+)?"
    ).unwrap();

    pub static ref TEMPLATE_PRICE: Regex = Regex::new(
        r"(?i)(?:price|preis)\s*:\s*([0-9]+(?:[.,][0-9]+|[ \u{00a0}][0-9]{3})*)"
    ).unwrap();

    pub static ref ANNOTATION: Regex = Regex::new(
        r"(?i)standard|estimated|position|geschätzt|geschaetzt"
    ).unwrap();
}

/// Label prefixes that turn a total into a partial sum.
pub const SUBTOTAL_PREFIXES: &[&str] = &["sub", "zwischen"];

/// First-cell labels that mark a table row as a header or summary row.
pub const HEADER_KEYWORDS: &[&str] = &[
    "pos",
    "no.",
    "nr",
    "description",
    "quantity",
    "qty",
    "unit",
    "price",
    "total",
    "sum",
    "subtotal",
    "bezeichnung",
    "beschreibung",
    "menge",
    "einheit",
    "preis",
    "gesamt",
    "summe",
    "zwischensumme",
];
