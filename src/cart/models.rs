//! Shopping Cart Domain Models
//!
//! This module contains all data structures related to the shopping cart
//! business domain.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::{collections::HashMap, sync::Arc};

// =============================================================================
// Product & Cart Entry
// =============================================================================

/// Price of a product, as supplied by the catalog.
///
/// Catalogs send either a JSON number or a numeric string; the original form
/// is kept so the entry serializes back the way it came in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Price {
    Number(Number),
    Text(String),
}

impl Price {
    /// Numeric amount of this price.
    ///
    /// Strings follow numeric-literal coercion: surrounding whitespace is
    /// ignored, an empty string is zero, `Infinity` may carry a sign, and
    /// unsigned `0x`/`0o`/`0b` prefixes select a radix. Anything else that is
    /// not a decimal literal yields `NaN`.
    pub fn amount(&self) -> f64 {
        match self {
            Price::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Price::Text(s) => coerce_number(s),
        }
    }
}

impl From<f64> for Price {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or_else(|| Price::Text(n.to_string()), Price::Number)
    }
}

impl From<i64> for Price {
    fn from(n: i64) -> Self {
        Price::Number(n.into())
    }
}

fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return parse_radix(digits, radix);
        }
    }

    let (sign, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    if body == "Infinity" {
        return sign * f64::INFINITY;
    }

    // Restrict to decimal literal characters so `inf`/`nan` spellings and
    // doubled signs are rejected before the float parser sees them.
    let decimal = body.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        && body
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !decimal {
        return f64::NAN;
    }

    body.parse::<f64>().map_or(f64::NAN, |n| sign * n)
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }

    digits
        .chars()
        .try_fold(0.0, |acc: f64, c| {
            c.to_digit(radix)
                .map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN)
}

/// A product offered by the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Product identifier, unique within a cart
    pub id: String,

    /// Display name of the product
    pub name: String,

    /// Unit price
    pub price: Price,

    /// Captures any extra fields (e.g., description, image) dynamically
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl Product {
    /// Builds a product with no extra fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: impl Into<Price>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: price.into(),
            extra: HashMap::new(),
        }
    }
}

/// A product held in the cart together with its quantity.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartEntry {
    #[serde(flatten)]
    pub product: Product,

    /// Always at least 1
    pub quantity: u32,
}

impl CartEntry {
    /// Creates an entry with quantity 1.
    ///
    /// A product field named `quantity` would shadow the cart's own count, so
    /// it is dropped.
    pub fn from_product(mut product: Product) -> Self {
        product.extra.remove("quantity");
        Self {
            product,
            quantity: 1,
        }
    }

    pub fn id(&self) -> &str {
        &self.product.id
    }

    /// `price x quantity` for this entry.
    pub fn line_total(&self) -> f64 {
        self.product.price.amount() * f64::from(self.quantity)
    }

    /// Returns a copy of this entry with a different quantity.
    pub fn with_quantity(&self, quantity: u32) -> Self {
        Self {
            product: self.product.clone(),
            quantity,
        }
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// An immutable view of the cart with its aggregates computed up front.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSnapshot {
    entries: Arc<[CartEntry]>,
    total_price: f64,
    item_count: u64,
}

impl Default for CartSnapshot {
    fn default() -> Self {
        Self::from_entries(Vec::new())
    }
}

impl CartSnapshot {
    pub fn from_entries(entries: Vec<CartEntry>) -> Self {
        let total_price = entries.iter().map(CartEntry::line_total).sum();
        let item_count = entries.iter().map(|e| u64::from(e.quantity)).sum();

        Self {
            entries: entries.into(),
            total_price,
            item_count,
        }
    }

    pub fn entries(&self) -> &Arc<[CartEntry]> {
        &self.entries
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Request / Response Payloads
// =============================================================================

/// Body for `PUT /cart/items/{id}`
#[derive(Debug, Deserialize)]
pub struct QuantityInput {
    /// New quantity; anything below 1 removes the entry
    pub quantity: i64,
}

/// The cart as seen by the cart view
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    /// Entries in insertion order
    pub items: Vec<CartEntry>,

    /// Sum of `price x quantity`
    pub total_price: f64,

    /// Sum of quantities
    pub item_count: u64,

    /// One-line summary, e.g. `"2x Apple, 1x Banana"`
    pub summary: String,
}

impl From<&CartSnapshot> for CartView {
    fn from(snapshot: &CartSnapshot) -> Self {
        Self {
            items: snapshot.entries().to_vec(),
            total_price: snapshot.total_price(),
            item_count: snapshot.item_count(),
            summary: super::helpers::format_item_summary(snapshot.entries()),
        }
    }
}
