//! Raw inventory rows as served by the backend export.
//!
//! The export uses spreadsheet-style column names verbatim, including the
//! space in "Item title". Rows decode independently so one broken row cannot
//! empty the whole table.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// One product row from the backend inventory export.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StockRecord {
    /// Stock keeping unit
    #[serde(rename = "SKU", default)]
    pub sku: String,
    /// Product title
    #[serde(rename = "Item title", default)]
    pub title: String,
    /// Product category
    #[serde(rename = "Category", default)]
    pub category: String,
    /// Brand name
    #[serde(rename = "Brand", default)]
    pub brand: String,
    /// Units on hand
    #[serde(rename = "Quantity", default)]
    pub quantity: i64,
    /// Unit list price
    #[serde(default)]
    pub price: f64,
}

/// Decodes an inventory payload into typed rows.
///
/// The payload is expected to be a JSON array; anything else yields an empty
/// table. Rows that fail to decode are dropped with a warning.
#[must_use]
pub fn parse_rows(payload: &Value) -> Vec<StockRecord> {
    let Some(entries) = payload.as_array() else {
        warn!("inventory payload is not an array, treating as empty");
        return Vec::new();
    };

    entries
        .iter()
        .enumerate()
        .filter_map(
            |(position, entry)| match serde_json::from_value::<StockRecord>(entry.clone()) {
                Ok(row) => Some(row),
                Err(error) => {
                    warn!(position, %error, "dropping malformed inventory row");
                    None
                }
            },
        )
        .collect()
}
