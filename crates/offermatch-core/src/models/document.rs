//! Line item and document models shared by both extraction paths.

use serde::{Deserialize, Serialize};

/// A single position of an offer or quotation template.
///
/// Numeric-looking fields (`quantity`, `price`) keep the text exactly as it
/// appeared in the source, including its locale formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Position number as printed ("1", "2.010").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    /// Item description, never empty.
    pub description: String,

    /// Quantity as printed ("50", "2,5").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,

    /// Unit of measure ("m³", "Stk.", "flat-rate").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Price as printed ("1750.00", "1.750,00").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    /// Free-form annotations collected from the template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl LineItem {
    /// Create an item with only a description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn with_quantity(mut self, quantity: impl Into<String>, unit: Option<&str>) -> Self {
        self.quantity = Some(quantity.into());
        self.unit = unit.map(str::to_string);
        self
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A parsed quotation template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// First meaningful line of the template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Positions in document order.
    pub positions: Vec<LineItem>,

    /// Total amount as printed after "Sum:" / "Total:".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<String>,
}

impl Document {
    /// Number of positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if the document has no positions.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_json_field_names() {
        let doc = Document {
            title: Some("Offer 2024-17".to_string()),
            positions: vec![LineItem::new("Excavation").with_number("1")],
            total_amount: Some("1750,00".to_string()),
        };

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["totalAmount"], "1750,00");
        assert_eq!(json["positions"][0]["number"], "1");
        assert!(json["positions"][0].get("price").is_none());
    }
}
