//! Derivation of display-ready bundle records from raw feed records.
//!
//! Every field of a [`BundleView`] is recomputed from its [`RawBundle`] on
//! each derivation; views are never mutated in place. Derivation is total
//! over parsed records (malformed records are already dropped by the feed
//! parser), deterministic for a given `now`, and preserves input order.

use crate::core::classify::{self, BundleKind, BundleStatus};
use crate::core::schedule;
use crate::feed::{RawBundle, parse_feed};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Forecasted revenue is projected at 100 sales of the bundle.
pub const FORECAST_MULTIPLIER: f64 = 100.0;

/// Actual revenue assumes 75 sales while a bundle is active.
pub const ACTUAL_MULTIPLIER: f64 = 75.0;

/// Margin fraction applied when the feed carries no margin at all.
const DEFAULT_MARGIN_FRACTION: f64 = 0.35;

/// Margin label shown when the feed carries no margin at all.
const DEFAULT_MARGIN_LABEL: &str = "35%";

/// A bundle in the form the dashboard renders, with every derived field
/// precomputed.
///
/// Field names serialize to the dashboard's existing JSON contract, which
/// mixes camelCase with a few legacy snake_case keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleView {
    /// Feed identifier, or `bundle-<position>` when the feed omits one
    pub id: String,
    /// Feed name, or "Unnamed Bundle" when the feed omits one
    pub name: String,
    /// Synthesized "Bundle containing: ..." summary of the items
    pub description: String,
    /// Names of the bundled products, in feed order, unnamed items dropped
    pub products: Vec<String>,
    /// Pre-discount price back-computed from the profit margin
    pub original_price: f64,
    /// Selling price straight from the feed
    pub bundle_price: f64,
    /// Whole-percent discount of the bundle price against the original
    #[serde(rename = "discount")]
    pub discount_percent: u8,
    /// Marketing category classified from the rationale text
    #[serde(rename = "type")]
    pub kind: BundleKind,
    /// Lifecycle state classified from the duration and season text
    pub status: BundleStatus,
    /// Moment the derivation ran
    pub start_date: DateTime<Utc>,
    /// Start plus the parsed duration, or a six-month default horizon
    pub end_date: DateTime<Utc>,
    /// Projected revenue over the bundle's run
    pub forecasted_revenue: f64,
    /// Revenue attributed so far; zero unless the bundle is active
    pub actual_revenue: f64,
    /// Mirrors `start_date`
    pub created_at: DateTime<Utc>,
    /// Raw margin label from the feed, defaulted when absent
    pub profit_margin: String,
    /// Total quantity across all items, unnamed ones included
    pub item_count: i64,
    /// Free-text explanation from the feed, empty when absent
    pub rationale: String,
    /// Free-text duration descriptor from the feed, empty when absent
    pub duration: String,
    /// Free-text season range from the feed, empty when absent
    pub season: String,
    /// Target customer segments, passed through unchanged
    #[serde(rename = "customer_segments")]
    pub customer_segments: Vec<String>,
}

/// Parses a feed payload and derives a view for every well-formed record.
///
/// Composes the tolerant feed parse (which drops and logs malformed records)
/// with [`derive_bundles`]; output order matches feed order.
#[must_use]
pub fn derive_feed(payload: &Value, now: DateTime<Utc>) -> Vec<BundleView> {
    derive_bundles(&parse_feed(payload), now)
}

/// Derives views for a slice of parsed records, preserving order.
///
/// Positions for the id fallback are 1-based, so a feed that omits every id
/// yields `bundle-1`, `bundle-2`, and so on.
#[must_use]
pub fn derive_bundles(records: &[RawBundle], now: DateTime<Utc>) -> Vec<BundleView> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| derive_bundle(record, index + 1, now))
        .collect()
}

/// Derives a single display record from a parsed feed record.
///
/// # Arguments
/// * `record` - The parsed feed record
/// * `position` - 1-based position in the batch, used for the id fallback
/// * `now` - Wall-clock time used for status and date derivation
#[must_use]
pub fn derive_bundle(record: &RawBundle, position: usize, now: DateTime<Utc>) -> BundleView {
    let margin = margin_fraction(record.profit_margin.as_deref());
    let original_price = original_price(record.price, margin);
    let status = classify::classify_status(record.duration.as_deref(), record.season.as_deref(), now);
    let (start_date, end_date) = schedule::bundle_window(record.duration.as_deref(), now);

    let named: Vec<_> = record
        .items
        .iter()
        .filter(|item| !item.name.is_empty())
        .collect();
    let description = format!(
        "Bundle containing: {}",
        named
            .iter()
            .map(|item| format!("{}x {}", item.effective_qty(), item.name))
            .collect::<Vec<_>>()
            .join(", ")
    );

    BundleView {
        id: if record.id.is_empty() {
            format!("bundle-{position}")
        } else {
            record.id.clone()
        },
        name: if record.name.is_empty() {
            "Unnamed Bundle".to_owned()
        } else {
            record.name.clone()
        },
        description,
        products: named.iter().map(|item| item.name.clone()).collect(),
        original_price,
        bundle_price: record.price,
        discount_percent: discount_percent(original_price, record.price),
        kind: classify::classify_kind(record.rationale.as_deref().unwrap_or("")),
        status,
        start_date,
        end_date,
        forecasted_revenue: record.price * FORECAST_MULTIPLIER,
        actual_revenue: if status == BundleStatus::Active {
            record.price * ACTUAL_MULTIPLIER
        } else {
            0.0
        },
        created_at: start_date,
        profit_margin: record
            .profit_margin
            .clone()
            .unwrap_or_else(|| DEFAULT_MARGIN_LABEL.to_owned()),
        item_count: record.total_quantity(),
        rationale: record.rationale.clone().unwrap_or_default(),
        duration: record.duration.clone().unwrap_or_default(),
        season: record.season.clone().unwrap_or_default(),
        customer_segments: record.customer_segments.clone(),
    }
}

/// Parses a margin label into a fraction of the selling price.
///
/// An absent label falls back to the default margin. A present but
/// unparsable label yields NaN, which fails the `[0, 1)` range check in
/// [`original_price`] and so leaves the original price at the bundle price.
fn margin_fraction(label: Option<&str>) -> f64 {
    let Some(text) = label else {
        return DEFAULT_MARGIN_FRACTION;
    };
    let trimmed = text.trim();
    let numeric = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    numeric
        .parse::<f64>()
        .map_or(f64::NAN, |percent| percent / 100.0)
}

/// Back-computes the pre-discount price from the margin fraction.
///
/// Margins outside `[0, 1)` (including NaN from unparsable labels) cannot be
/// inverted and leave the original price equal to the bundle price. The
/// result is rounded to cents.
fn original_price(bundle_price: f64, margin_fraction: f64) -> f64 {
    let raw = if (0.0..1.0).contains(&margin_fraction) {
        bundle_price / (1.0 - margin_fraction)
    } else {
        bundle_price
    };
    round_cents(raw)
}

/// Whole-percent discount of the bundle price against the original price.
///
/// Zero when the original price is non-positive.
fn discount_percent(original_price: f64, bundle_price: f64) -> u8 {
    if original_price <= 0.0 {
        return 0;
    }
    let percent = ((original_price - bundle_price) / original_price * 100.0).round();
    // Cast safety: the clamp bounds the value to [0, 100], which fits in u8.
    // Truncation and sign loss are intentional.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = percent.clamp(0.0, 100.0) as u8;
    percent
}

/// Rounds a price to 2 decimal places.
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]

    use super::*;
    use crate::feed::RawItem;
    use crate::test_utils::{bundle_json, feed_payload, fixed_now, raw_item, test_bundle};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    // --- Price back-calculation scenarios ---

    #[test]
    fn test_margin_50_doubles_price() {
        let mut record = test_bundle("b1", "Morning Kit");
        record.price = 100.0;
        record.profit_margin = Some("50".to_owned());

        let view = derive_bundle(&record, 1, fixed_now());
        assert_eq!(view.original_price, 200.0);
        assert_eq!(view.bundle_price, 100.0);
        assert_eq!(view.discount_percent, 50);
    }

    #[test]
    fn test_margin_zero_keeps_price() {
        let mut record = test_bundle("b1", "Morning Kit");
        record.price = 60.0;
        record.profit_margin = Some("0".to_owned());

        let view = derive_bundle(&record, 1, fixed_now());
        assert_eq!(view.original_price, 60.0);
        assert_eq!(view.discount_percent, 0);
    }

    #[test]
    fn test_margin_with_percent_suffix() {
        let mut record = test_bundle("b1", "Morning Kit");
        record.price = 100.0;
        record.profit_margin = Some("80%".to_owned());

        let view = derive_bundle(&record, 1, fixed_now());
        assert_eq!(view.original_price, 500.0);
        assert_eq!(view.discount_percent, 80);
    }

    #[test]
    fn test_margin_unparsable_falls_back_to_bundle_price() {
        let mut record = test_bundle("b1", "Morning Kit");
        record.price = 100.0;
        record.profit_margin = Some("abc".to_owned());

        let view = derive_bundle(&record, 1, fixed_now());
        assert_eq!(view.original_price, 100.0);
        assert_eq!(view.discount_percent, 0);
        // The raw label still shows on the card
        assert_eq!(view.profit_margin, "abc");
    }

    #[test]
    fn test_margin_at_or_above_100_falls_back() {
        let mut record = test_bundle("b1", "Morning Kit");
        record.price = 100.0;
        record.profit_margin = Some("100".to_owned());
        assert_eq!(derive_bundle(&record, 1, fixed_now()).original_price, 100.0);

        record.profit_margin = Some("250".to_owned());
        assert_eq!(derive_bundle(&record, 1, fixed_now()).original_price, 100.0);
    }

    #[test]
    fn test_margin_negative_falls_back() {
        let mut record = test_bundle("b1", "Morning Kit");
        record.price = 100.0;
        record.profit_margin = Some("-20".to_owned());

        let view = derive_bundle(&record, 1, fixed_now());
        assert_eq!(view.original_price, 100.0);
        assert_eq!(view.discount_percent, 0);
    }

    #[test]
    fn test_margin_absent_defaults_to_35() {
        let mut record = test_bundle("b1", "Morning Kit");
        record.price = 65.0;
        record.profit_margin = None;

        let view = derive_bundle(&record, 1, fixed_now());
        // 65 / (1 - 0.35) = 100
        assert_eq!(view.original_price, 100.0);
        assert_eq!(view.discount_percent, 35);
        assert_eq!(view.profit_margin, "35%");
    }

    #[test]
    fn test_original_price_rounds_to_cents() {
        let mut record = test_bundle("b1", "Morning Kit");
        record.price = 10.0;
        record.profit_margin = Some("33".to_owned());

        // 10 / 0.67 = 14.9253... → 14.93
        assert_eq!(derive_bundle(&record, 1, fixed_now()).original_price, 14.93);
    }

    #[test]
    fn test_discount_zero_when_price_is_zero() {
        let mut record = test_bundle("b1", "Freebie");
        record.price = 0.0;
        record.profit_margin = Some("50".to_owned());

        let view = derive_bundle(&record, 1, fixed_now());
        assert_eq!(view.original_price, 0.0);
        assert_eq!(view.discount_percent, 0);
    }

    // --- Status and schedule ---

    #[test]
    fn test_stock_sentinel_is_active() {
        let mut record = test_bundle("b1", "Morning Kit");
        record.duration = Some("Until stock runs out".to_owned());

        assert_eq!(
            derive_bundle(&record, 1, fixed_now()).status,
            BundleStatus::Active
        );
    }

    #[test]
    fn test_missing_schedule_fields_inactive() {
        let mut record = test_bundle("b1", "Morning Kit");
        record.duration = None;
        record.season = None;

        let view = derive_bundle(&record, 1, fixed_now());
        assert_eq!(view.status, BundleStatus::Inactive);
        assert_eq!(view.actual_revenue, 0.0);
    }

    #[test]
    fn test_dates_from_duration() {
        let record = test_bundle("b1", "Morning Kit");

        // Defaults use "2 months" from mid-June
        let view = derive_bundle(&record, 1, fixed_now());
        assert_eq!(view.start_date, fixed_now());
        assert_eq!(
            view.end_date,
            Utc.with_ymd_and_hms(2024, 8, 15, 12, 0, 0).unwrap()
        );
        assert_eq!(view.created_at, view.start_date);
    }

    #[test]
    fn test_dates_default_horizon() {
        let mut record = test_bundle("b1", "Morning Kit");
        record.duration = Some("for a while".to_owned());

        let view = derive_bundle(&record, 1, fixed_now());
        assert_eq!(
            view.end_date,
            Utc.with_ymd_and_hms(2024, 12, 15, 12, 0, 0).unwrap()
        );
    }

    // --- Classification and revenue ---

    #[test]
    fn test_kind_from_rationale() {
        let mut record = test_bundle("b1", "Morning Kit");
        record.rationale = Some("This is a volume discount bundle".to_owned());
        assert_eq!(derive_bundle(&record, 1, fixed_now()).kind, BundleKind::Volume);

        record.rationale = None;
        assert_eq!(derive_bundle(&record, 1, fixed_now()).kind, BundleKind::Default);
    }

    #[test]
    fn test_revenue_multipliers() {
        let record = test_bundle("b1", "Morning Kit");

        // Default fixture is active in June (May–August window)
        let view = derive_bundle(&record, 1, fixed_now());
        assert_eq!(view.status, BundleStatus::Active);
        assert_eq!(view.forecasted_revenue, 10_000.0);
        assert_eq!(view.actual_revenue, 7_500.0);
    }

    // --- Description, products, counts ---

    #[test]
    fn test_description_and_products() {
        let view = derive_bundle(&test_bundle("b1", "Morning Kit"), 1, fixed_now());
        assert_eq!(
            view.description,
            "Bundle containing: 2x Espresso Beans, 1x Moka Pot"
        );
        assert_eq!(view.products, vec!["Espresso Beans", "Moka Pot"]);
        assert_eq!(view.item_count, 3);
    }

    #[test]
    fn test_unnamed_items_counted_but_not_listed() {
        let mut record = test_bundle("b1", "Morning Kit");
        record.items = vec![raw_item("Espresso Beans", 2), raw_item("", 5)];

        let view = derive_bundle(&record, 1, fixed_now());
        assert_eq!(view.description, "Bundle containing: 2x Espresso Beans");
        assert_eq!(view.products, vec!["Espresso Beans"]);
        assert_eq!(view.item_count, 7);
    }

    #[test]
    fn test_no_named_items_leaves_empty_listing() {
        let mut record = test_bundle("b1", "Mystery Box");
        record.items = vec![RawItem {
            name: String::new(),
            qty: None,
        }];

        let view = derive_bundle(&record, 1, fixed_now());
        assert_eq!(view.description, "Bundle containing: ");
        assert!(view.products.is_empty());
        assert_eq!(view.item_count, 1);
    }

    // --- Fallback identity ---

    #[test]
    fn test_id_fallback_uses_position() {
        let mut record = test_bundle("", "Morning Kit");
        record.id = String::new();

        assert_eq!(derive_bundle(&record, 2, fixed_now()).id, "bundle-2");
    }

    #[test]
    fn test_name_fallback() {
        let record = test_bundle("b1", "");
        assert_eq!(derive_bundle(&record, 1, fixed_now()).name, "Unnamed Bundle");
    }

    #[test]
    fn test_segments_passthrough() {
        let mut record = test_bundle("b1", "Morning Kit");
        record.customer_segments = vec!["students".to_owned(), "commuters".to_owned()];

        assert_eq!(
            derive_bundle(&record, 1, fixed_now()).customer_segments,
            vec!["students", "commuters"]
        );
    }

    #[test]
    fn test_text_fields_pass_through_with_empty_defaults() {
        let present = derive_bundle(&test_bundle("b1", "Morning Kit"), 1, fixed_now());
        assert_eq!(present.rationale, "Complementary products often bought together");
        assert_eq!(present.duration, "2 months");
        assert_eq!(present.season, "May–August");

        let mut record = test_bundle("b2", "Bare Kit");
        record.rationale = None;
        record.duration = None;
        record.season = None;

        // Absent fields serialize as empty strings, never null
        let view = derive_bundle(&record, 2, fixed_now());
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["rationale"], "");
        assert_eq!(value["duration"], "");
        assert_eq!(value["season"], "");
    }

    // --- Batch behavior ---

    #[test]
    fn test_derive_feed_skips_malformed_and_keeps_order() {
        let payload = feed_payload(vec![
            bundle_json("b1", "First"),
            json!({"bundle_id": "broken", "items": "not an array"}),
            bundle_json("b3", "Third"),
        ]);

        let views = derive_feed(&payload, fixed_now());
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].id, "b1");
        assert_eq!(views[1].id, "b3");
    }

    #[test]
    fn test_derive_feed_is_idempotent() {
        let payload = feed_payload(vec![bundle_json("b1", "First"), bundle_json("", "")]);

        let first = derive_feed(&payload, fixed_now());
        let second = derive_feed(&payload, fixed_now());
        assert_eq!(first, second);
        // The positional fallback is stable across runs
        assert_eq!(first[1].id, "bundle-2");
    }

    #[test]
    fn test_serialized_field_names_match_dashboard_contract() {
        let view = derive_bundle(&test_bundle("b1", "Morning Kit"), 1, fixed_now());
        let value = serde_json::to_value(&view).unwrap();
        let object = value.as_object().unwrap();

        for key in [
            "originalPrice",
            "bundlePrice",
            "discount",
            "type",
            "status",
            "startDate",
            "endDate",
            "forecastedRevenue",
            "actualRevenue",
            "createdAt",
            "profitMargin",
            "itemCount",
            "rationale",
            "duration",
            "season",
            "customer_segments",
        ] {
            assert!(object.contains_key(key), "missing key {key}");
        }
        assert_eq!(object["type"], "complementary");
        assert_eq!(object["status"], "active");
    }
}
