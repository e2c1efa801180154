//! Item under construction while scanning lines.

use crate::models::LineItem;

use super::amounts::valid_amount;

/// A line item whose fields are still being collected.
///
/// Scanners own exactly one of these at a time and hand it to [`seal`]
/// once the next position starts or the input ends.
///
/// [`seal`]: PartialItem::seal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PartialItem {
    number: Option<String>,
    description: String,
    quantity: Option<String>,
    unit: Option<String>,
    price: Option<String>,
    notes: Option<String>,
}

impl PartialItem {
    pub fn open(number: Option<&str>, description: &str) -> Self {
        Self {
            number: number.map(str::to_string),
            description: description.trim().to_string(),
            ..Self::default()
        }
    }

    /// True once a quantity or a price has been captured.
    pub fn has_amounts(&self) -> bool {
        self.quantity.is_some() || self.price.is_some()
    }

    pub fn append_description(mut self, line: &str) -> Self {
        let line = line.trim();
        if !line.is_empty() {
            if !self.description.is_empty() {
                self.description.push(' ');
            }
            self.description.push_str(line);
        }
        self
    }

    /// Set quantity and unit. A quantity that is not a number leaves both unset.
    pub fn with_quantity(mut self, quantity: &str, unit: Option<&str>) -> Self {
        if let Some(quantity) = valid_amount(quantity) {
            self.quantity = Some(quantity);
            self.unit = unit
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(str::to_string);
        }
        self
    }

    /// Set the price. A price that is not a number is dropped.
    pub fn with_price(mut self, price: &str) -> Self {
        if let Some(price) = valid_amount(price) {
            self.price = Some(price);
        }
        self
    }

    pub fn append_note(mut self, line: &str) -> Self {
        let line = line.trim();
        self.notes = Some(match self.notes.take() {
            Some(notes) => format!("{notes} {line}"),
            None => line.to_string(),
        });
        self
    }

    /// Finish the item; items without a description are discarded.
    pub fn seal(self) -> Option<LineItem> {
        if self.description.is_empty() {
            return None;
        }
        Some(LineItem {
            number: self.number,
            description: self.description,
            quantity: self.quantity,
            unit: self.unit,
            price: self.price,
            notes: self.notes,
        })
    }
}
