//! Dashboard roll-ups: favorites summary, revenue trend shaping, forecast
//! accuracy, and euro formatting.

use crate::core::derive::BundleView;
use crate::feed::TrendDay;
use chrono::{DateTime, NaiveDate};
use serde::Serialize;

/// Aggregate figures shown above the favorites list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesSummary {
    /// Sum of original minus bundle price over all favorites
    pub total_savings: f64,
    /// Mean discount percentage, rounded to a whole percent
    pub average_discount: u8,
    /// Sum of item counts over all favorites
    pub total_items: i64,
}

/// One labelled point on the revenue trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// Day label such as "05 Jan", or the raw date text if unparseable
    pub label: String,
    /// Revenue taken that day
    pub revenue: f64,
    /// Orders placed that day
    pub orders: i64,
    /// Items sold that day
    pub items: i64,
}

/// Column totals across the whole trend window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendTotals {
    /// Revenue over the window
    pub revenue: f64,
    /// Orders over the window
    pub orders: i64,
    /// Items sold over the window
    pub items: i64,
}

/// Rolls up savings, discount, and item figures over favorited bundles.
///
/// All figures are zero for an empty list.
#[must_use]
pub fn favorites_summary(bundles: &[BundleView]) -> FavoritesSummary {
    if bundles.is_empty() {
        return FavoritesSummary {
            total_savings: 0.0,
            average_discount: 0,
            total_items: 0,
        };
    }

    let total_savings = bundles
        .iter()
        .map(|bundle| bundle.original_price - bundle.bundle_price)
        .sum();
    let discount_sum: u32 = bundles
        .iter()
        .map(|bundle| u32::from(bundle.discount_percent))
        .sum();
    // Cast safety: the mean of values in [0, 100] rounds to [0, 100], which
    // fits in u8; list lengths are far below f64 precision limits.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let average_discount = (f64::from(discount_sum) / bundles.len() as f64).round() as u8;

    FavoritesSummary {
        total_savings,
        average_discount,
        total_items: bundles.iter().map(|bundle| bundle.item_count).sum(),
    }
}

/// Renders a backend date as a short chart label like "05 Jan".
///
/// Accepts plain `YYYY-MM-DD` dates or full RFC 3339 timestamps; anything
/// else keeps the raw text as the label.
#[must_use]
pub fn trend_label(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|moment| moment.date_naive()))
        .map_or_else(
            |_| raw.to_owned(),
            |date| date.format("%d %b").to_string(),
        )
}

/// Shapes backend trend days into labelled chart points, preserving order.
#[must_use]
pub fn trend_points(days: &[TrendDay]) -> Vec<TrendPoint> {
    days.iter()
        .map(|day| TrendPoint {
            label: trend_label(&day.date),
            revenue: day.revenue,
            orders: day.orders,
            items: day.items,
        })
        .collect()
}

/// Sums each trend column over the whole window.
#[must_use]
pub fn trend_totals(days: &[TrendDay]) -> TrendTotals {
    TrendTotals {
        revenue: days.iter().map(|day| day.revenue).sum(),
        orders: days.iter().map(|day| day.orders).sum(),
        items: days.iter().map(|day| day.items).sum(),
    }
}

/// Ratio of predicted to actual revenue, rounded to 7 significant digits.
///
/// Zero when either figure is zero, so a missing prediction or an empty
/// ledger never shows as infinite accuracy.
#[must_use]
pub fn forecast_accuracy(predicted: f64, actual: f64) -> f64 {
    if predicted == 0.0 || actual == 0.0 {
        return 0.0;
    }
    round_significant(predicted / actual, 7)
}

/// Rounds a value to the given number of significant digits.
fn round_significant(value: f64, digits: i32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    // Cast safety: log10 of a finite non-zero f64 lies within ±309, well
    // inside i32 range.
    #[allow(clippy::cast_possible_truncation)]
    let magnitude = value.abs().log10().floor() as i32;
    let factor = 10f64.powi(digits - 1 - magnitude);
    (value * factor).round() / factor
}

/// Formats a whole-euro amount with thousands separators, e.g. `€12,500`.
#[must_use]
pub fn format_euro(amount: f64) -> String {
    let negative = amount < 0.0;
    // Cast safety: dashboard amounts are far below u64::MAX, and rounding
    // first keeps the cast exact.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = amount.abs().round() as u64;
    let grouped = group_thousands(whole);
    if negative {
        format!("-€{grouped}")
    } else {
        format!("€{grouped}")
    }
}

/// Formats a euro amount with cents, e.g. `€123.45`.
#[must_use]
pub fn format_euro_cents(amount: f64) -> String {
    format!("€{amount:.2}")
}

/// Inserts a comma every three digits from the right.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
