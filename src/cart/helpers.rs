//! Shopping Cart Formatting Helpers

use super::models::CartEntry;

/// Produces a human-readable one-line summary for a list of cart entries.
///
/// Example output: `"2x Apple, 1x Banana"`.
pub fn format_item_summary(entries: &[CartEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("{}x {}", e.quantity, e.product.name))
        .collect::<Vec<_>>()
        .join(", ")
}
