//! Stock view items, low-stock alerts, and inventory filtering.

use crate::feed::StockRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Stock level an item must fall in to pass a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockLevelFilter {
    /// Every level passes
    #[default]
    All,
    /// Quantity below the low-stock threshold, including zero
    Low,
    /// Quantity exactly zero
    Out,
    /// Quantity above zero
    In,
}

/// A product row in the form the inventory page renders.
///
/// The feed carries a single price, so the original and final prices start
/// out equal; a pricing pass may later lower `final_price`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    /// Stock keeping unit
    pub sku: String,
    /// Product title
    pub title: String,
    /// Product category
    pub category: String,
    /// Brand name
    pub brand: String,
    /// List price before any discount
    pub original_price: f64,
    /// Price after discounts; equals the list price straight off the feed
    pub final_price: f64,
    /// Units on hand
    pub stock_quantity: i64,
}

/// How urgent a stock alert is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    /// Stock below the configured threshold
    Low,
}

/// A low-stock warning raised for one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAlert {
    /// Stock keeping unit of the affected item
    pub sku: String,
    /// Title of the affected item
    pub title: String,
    /// Units on hand when the alert was raised
    pub current_stock: i64,
    /// Threshold the stock fell below
    pub threshold: i64,
    /// How urgent the alert is
    pub severity: AlertSeverity,
    /// When the alert was raised
    pub raised_at: DateTime<Utc>,
}

/// Criteria applied to a list of stock items.
///
/// The default filter passes everything.
#[derive(Debug, Clone, Default)]
pub struct StockFilter {
    /// Case-insensitive text matched against title and SKU
    pub query: String,
    /// Exact category restriction; `None` passes every category
    pub category: Option<String>,
    /// Stock level restriction
    pub level: StockLevelFilter,
}

impl StockFilter {
    /// Returns true when the item satisfies the query, category, and stock
    /// level restrictions. The threshold only matters for the low level.
    #[must_use]
    pub fn matches(&self, item: &StockItem, threshold: i64) -> bool {
        let query = self.query.trim().to_lowercase();
        let query_hit = query.is_empty()
            || item.title.to_lowercase().contains(&query)
            || item.sku.to_lowercase().contains(&query);

        let category_hit = self
            .category
            .as_ref()
            .is_none_or(|category| item.category == *category);

        let level_hit = match self.level {
            StockLevelFilter::All => true,
            StockLevelFilter::Low => item.stock_quantity < threshold,
            StockLevelFilter::Out => item.stock_quantity == 0,
            StockLevelFilter::In => item.stock_quantity > 0,
        };

        query_hit && category_hit && level_hit
    }
}

/// Converts parsed feed rows into stock view items, preserving order.
#[must_use]
pub fn stock_items(records: &[StockRecord]) -> Vec<StockItem> {
    records
        .iter()
        .map(|record| StockItem {
            sku: record.sku.clone(),
            title: record.title.clone(),
            category: record.category.clone(),
            brand: record.brand.clone(),
            original_price: record.price,
            final_price: record.price,
            stock_quantity: record.quantity,
        })
        .collect()
}

/// Raises an alert for every item stocked below the threshold, in item order.
#[must_use]
pub fn low_stock_alerts(items: &[StockItem], threshold: i64, now: DateTime<Utc>) -> Vec<StockAlert> {
    items
        .iter()
        .filter(|item| item.stock_quantity < threshold)
        .map(|item| StockAlert {
            sku: item.sku.clone(),
            title: item.title.clone(),
            current_stock: item.stock_quantity,
            threshold,
            severity: AlertSeverity::Low,
            raised_at: now,
        })
        .collect()
}

/// Applies a stock filter to a slice of items, preserving order.
#[must_use]
pub fn filter_stock(items: &[StockItem], filter: &StockFilter, threshold: i64) -> Vec<StockItem> {
    items
        .iter()
        .filter(|item| filter.matches(item, threshold))
        .cloned()
        .collect()
}

/// Distinct non-empty categories of the given items, sorted alphabetically.
#[must_use]
pub fn categories(items: &[StockItem]) -> Vec<String> {
    let mut names: Vec<String> = items
        .iter()
        .filter(|item| !item.category.is_empty())
        .map(|item| item.category.clone())
        .collect();
    names.sort();
    names.dedup();
    names
}
