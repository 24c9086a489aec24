//! Shared test utilities for `BundleBoard`.
//!
//! This module provides common helper functions for building feed records
//! and payloads with sensible defaults, plus a fixed clock so status and
//! date derivations are reproducible.

use crate::feed::{RawBundle, RawItem, StockRecord};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Value, json};

/// A fixed "now" for derivation tests: 2024-06-15 12:00 UTC, mid-June.
///
/// June sits inside the default fixture's May–August season, so the default
/// bundle derives as active.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

/// Creates a bundle item with the given name and quantity.
#[must_use]
pub fn raw_item(name: &str, qty: i64) -> RawItem {
    RawItem {
        name: name.to_string(),
        qty: Some(qty),
    }
}

/// Creates a test bundle record with sensible defaults.
///
/// # Arguments
/// * `id` - Bundle identifier (empty string to exercise the fallback)
/// * `name` - Bundle name (empty string to exercise the fallback)
///
/// # Defaults
/// * `items`: 2x Espresso Beans + 1x Moka Pot
/// * `price`: 100.0
/// * `profit_margin`: "35"
/// * `duration`: "2 months"
/// * `season`: "May–August" (active at [`fixed_now`])
/// * `rationale`: "Complementary products often bought together"
/// * `customer_segments`: empty
#[must_use]
pub fn test_bundle(id: &str, name: &str) -> RawBundle {
    RawBundle {
        id: id.to_string(),
        name: name.to_string(),
        items: vec![raw_item("Espresso Beans", 2), raw_item("Moka Pot", 1)],
        price: 100.0,
        profit_margin: Some("35".to_string()),
        duration: Some("2 months".to_string()),
        season: Some("May–August".to_string()),
        rationale: Some("Complementary products often bought together".to_string()),
        customer_segments: Vec::new(),
    }
}

/// Creates a test inventory row with sensible defaults.
///
/// # Defaults
/// * `category`: "Coffee"
/// * `brand`: "Brewista"
/// * `price`: 19.99
#[must_use]
pub fn stock_record(sku: &str, title: &str, quantity: i64) -> StockRecord {
    StockRecord {
        sku: sku.to_string(),
        title: title.to_string(),
        category: "Coffee".to_string(),
        brand: "Brewista".to_string(),
        quantity,
        price: 19.99,
    }
}

/// Wraps bundle JSON objects in the feed envelope the backend serves.
#[must_use]
pub fn feed_payload(bundles: Vec<Value>) -> Value {
    json!({ "bundles": bundles })
}

/// JSON form of [`test_bundle`], for exercising the feed parser end to end.
#[must_use]
pub fn bundle_json(id: &str, name: &str) -> Value {
    json!({
        "bundle_id": id,
        "name": name,
        "items": [
            { "item_name": "Espresso Beans", "qty": 2 },
            { "item_name": "Moka Pot", "qty": 1 }
        ],
        "price": 100.0,
        "profitMargin": "35",
        "duration": "2 months",
        "season": "May–August",
        "rationale": "Complementary products often bought together",
    })
}
