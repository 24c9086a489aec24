//! Raw bundle records as served by the backend feed.
//!
//! The backend's JSON is only loosely shaped: fields go missing, margins
//! arrive as strings or numbers, quantities as integers or floats, and text
//! fields are sometimes blank. All of that leniency lives here, so the
//! derivation logic downstream always works on fully defaulted records.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// One line item inside a raw bundle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawItem {
    /// Product name; empty when the backend omitted it
    #[serde(rename = "item_name", default, deserialize_with = "lenient_name")]
    pub name: String,
    /// Quantity as sent; `None` when missing or not numeric
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub qty: Option<i64>,
}

impl RawItem {
    /// Effective quantity: defaults to 1 when missing or non-positive.
    #[must_use]
    pub fn effective_qty(&self) -> i64 {
        match self.qty {
            Some(qty) if qty > 0 => qty,
            _ => 1,
        }
    }
}

/// A raw bundle record from the bundles feed.
///
/// Every field except `items` is optional on the wire; a record without a
/// usable items array is invalid and gets dropped by [`parse_feed`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawBundle {
    /// Backend identifier; empty when missing (derivation substitutes one)
    #[serde(rename = "bundle_id", default)]
    pub id: String,
    /// Bundle display name
    #[serde(default)]
    pub name: String,
    /// Line items making up the bundle
    #[serde(deserialize_with = "lenient_items")]
    pub items: Vec<RawItem>,
    /// Selling price of the whole bundle
    #[serde(default)]
    pub price: f64,
    /// Profit margin as a percentage, e.g. "35" or "35%"
    #[serde(rename = "profitMargin", default, deserialize_with = "lenient_text")]
    pub profit_margin: Option<String>,
    /// Free-text duration descriptor, e.g. "2 months"
    #[serde(default, deserialize_with = "lenient_text")]
    pub duration: Option<String>,
    /// Free-text season range, e.g. "September–November"
    #[serde(default, deserialize_with = "lenient_text")]
    pub season: Option<String>,
    /// Free-text explanation from the bundle generator
    #[serde(default, deserialize_with = "lenient_text")]
    pub rationale: Option<String>,
    /// Target customer segments
    #[serde(default, deserialize_with = "lenient_segments")]
    pub customer_segments: Vec<String>,
}

impl RawBundle {
    /// Total quantity across all line items (missing quantities count as 1).
    #[must_use]
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(RawItem::effective_qty).sum()
    }
}

/// Decodes a bundles feed envelope into typed records.
///
/// Each record is decoded independently: a malformed record (most commonly a
/// missing or non-array `items` field) is dropped with a warning while the
/// rest of the batch survives. Output order matches feed order. A payload
/// without a `bundles` array yields an empty batch, not an error.
#[must_use]
pub fn parse_feed(payload: &Value) -> Vec<RawBundle> {
    let Some(entries) = payload.get("bundles").and_then(Value::as_array) else {
        warn!("bundles feed has no \"bundles\" array, treating as empty");
        return Vec::new();
    };

    entries
        .iter()
        .enumerate()
        .filter_map(
            |(position, entry)| match serde_json::from_value::<RawBundle>(entry.clone()) {
                Ok(record) => Some(record),
                Err(error) => {
                    warn!(position, %error, "dropping malformed bundle record");
                    None
                }
            },
        )
        .collect()
}

/// Accepts a string name, mapping any other JSON type to an empty name.
fn lenient_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(name) => name,
        _ => String::new(),
    })
}

/// Accepts integers, floats, and numeric strings; anything else is `None`.
fn lenient_quantity<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            // Cast safety: feed quantities are small; a fractional quantity
            // is meaningless and truncates to its whole part.
            #[allow(clippy::cast_possible_truncation)]
            number.as_f64().map(|quantity| quantity as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    })
}

/// Accepts strings (blank becomes absent) and numbers (stringified, for
/// margins sent as bare numerics); anything else is absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

/// Requires an array but converts each element leniently: non-object items
/// become unnamed single-quantity placeholders instead of failing the record.
fn lenient_items<'de, D>(deserializer: D) -> Result<Vec<RawItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(entries) = value else {
        return Err(serde::de::Error::custom("items must be an array"));
    };

    Ok(entries
        .into_iter()
        .map(|entry| {
            serde_json::from_value::<RawItem>(entry).unwrap_or(RawItem {
                name: String::new(),
                qty: None,
            })
        })
        .collect())
}

/// Accepts an array of strings, silently skipping non-string entries;
/// any other shape means no segments.
fn lenient_segments<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::String(segment) => Some(segment),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}
