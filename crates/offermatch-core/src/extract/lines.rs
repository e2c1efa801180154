//! Line-pattern item recognition for free-flowing offer text.

use tracing::trace;

use crate::models::LineItem;

use super::partial::PartialItem;
use super::patterns::*;

/// State carried from one line to the next.
#[derive(Debug, Default)]
struct LineScan {
    items: Vec<LineItem>,
    current: Option<PartialItem>,
}

impl LineScan {
    fn step(self, line: &str) -> Self {
        let line = line.trim();

        if line.is_empty()
            || SUBTOTAL.is_match(line)
            || SEPARATOR.is_match(line)
            || BULLET.is_match(line)
            || BENEFITS_MARKER.is_match(line)
        {
            trace!("Ignoring line: {}", line);
            return self;
        }

        if let Some((number, description)) = position_header(line) {
            return self.open(&number, &description);
        }

        let Self { items, current } = self;
        let Some(item) = current else {
            return Self { items, current: None };
        };

        let (item, recognized) = apply_amounts(item, line);
        let item = if recognized || item.has_amounts() {
            item
        } else {
            item.append_description(line)
        };

        Self {
            items,
            current: Some(item),
        }
    }

    fn open(self, number: &str, description: &str) -> Self {
        let Self { mut items, current } = self;
        items.extend(current.and_then(PartialItem::seal));
        Self {
            items,
            current: Some(PartialItem::open(Some(number), description)),
        }
    }

    fn finish(self) -> Vec<LineItem> {
        let Self { mut items, current } = self;
        items.extend(current.and_then(PartialItem::seal));
        items
    }
}

/// Number and description of a position header line.
fn position_header(line: &str) -> Option<(String, String)> {
    if let Some(caps) = POSITION_LABELED.captures(line) {
        return Some((caps[1].to_string(), caps[2].trim().to_string()));
    }

    POSITION_NUMBERED.captures(line).map(|caps| {
        let number = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        (number.to_string(), caps[3].trim().to_string())
    })
}

/// Apply quantity and price patterns. One line may carry both.
fn apply_amounts(item: PartialItem, line: &str) -> (PartialItem, bool) {
    let mut recognized = false;
    let mut item = item;

    if let Some(caps) = QUANTITY_LABELED.captures(line) {
        item = item.with_quantity(&caps[1], caps.get(2).map(|m| m.as_str()));
        recognized = true;
    } else if let Some(caps) = QUANTITY_FLAT_RATE.captures(line) {
        item = item.with_quantity(&caps[1], Some(&caps[2]));
        recognized = true;
    } else if let Some(caps) = QUANTITY_TIMES.captures(line) {
        item = item.with_quantity(&caps[1], None);
        recognized = true;
    }

    if let Some(caps) = PRICE_LABELED.captures(line) {
        item = item.with_price(&caps[1]);
        recognized = true;
    } else if let Some(caps) = PRICE_TIMES.captures(line) {
        item = item.with_price(&caps[2]);
        recognized = true;
    }

    (item, recognized)
}

/// Items recognized line by line, in input order.
pub(crate) fn extract_items(text: &str) -> Vec<LineItem> {
    text.lines()
        .fold(LineScan::default(), LineScan::step)
        .finish()
}
