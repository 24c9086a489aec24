//! Inventory page: stock table with filters, pagination, and low-stock
//! alerts.

use crate::config::settings::Settings;
use crate::core::filter::{PageBounds, page_slice};
use crate::core::inventory::{self as stock, StockAlert, StockFilter, StockItem};
use crate::errors::Result;
use crate::feed::parse_rows;
use crate::pages::DashboardContext;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// The inventory screen.
///
/// Alerts are raised over the full item set, not the filtered one, so
/// narrowing the table never hides a low-stock warning.
pub struct InventoryPage {
    /// Every stock item from the feed, in feed order
    pub items: Vec<StockItem>,
    /// Distinct categories across all items, for the filter dropdown
    pub categories: Vec<String>,
    /// Items passing the active filter
    pub filtered: Vec<StockItem>,
    /// Bounds of the visible item page within `filtered`
    pub bounds: PageBounds,
    /// The visible page of filtered items
    pub page_items: Vec<StockItem>,
    /// Low-stock alerts across all items
    pub alerts: Vec<StockAlert>,
    /// Bounds of the visible alert page within `alerts`
    pub alert_bounds: PageBounds,
    /// The visible page of alerts
    pub page_alerts: Vec<StockAlert>,
}

impl InventoryPage {
    /// Builds the page from an already-fetched inventory payload.
    ///
    /// # Arguments
    /// * `payload` - Raw inventory response
    /// * `filter` - Active search/category/level filter
    /// * `settings` - Page sizes and the low-stock threshold
    /// * `page` - Requested 1-based item page, clamped into range
    /// * `alerts_page` - Requested 1-based alert page, clamped into range
    /// * `now` - Timestamp recorded on raised alerts
    #[must_use]
    pub fn build(
        payload: &Value,
        filter: &StockFilter,
        settings: &Settings,
        page: usize,
        alerts_page: usize,
        now: DateTime<Utc>,
    ) -> Self {
        let items = stock::stock_items(&parse_rows(payload));
        let categories = stock::categories(&items);
        let alerts = stock::low_stock_alerts(&items, settings.low_stock_threshold, now);
        let filtered = stock::filter_stock(&items, filter, settings.low_stock_threshold);

        let bounds = PageBounds::compute(filtered.len(), settings.page_size, page);
        let page_items = page_slice(&filtered, &bounds).to_vec();
        let alert_bounds =
            PageBounds::compute(alerts.len(), settings.alerts_page_size, alerts_page);
        let page_alerts = page_slice(&alerts, &alert_bounds).to_vec();

        Self {
            items,
            categories,
            filtered,
            bounds,
            page_items,
            alerts,
            alert_bounds,
            page_alerts,
        }
    }

    /// Fetches the inventory rows and builds the page.
    ///
    /// # Errors
    /// Returns an error when the inventory fetch fails.
    pub async fn load(
        context: &DashboardContext,
        filter: &StockFilter,
        page: usize,
        alerts_page: usize,
    ) -> Result<Self> {
        let payload = context.client.fetch_inventory().await?;
        Ok(Self::build(
            &payload,
            filter,
            &context.settings,
            page,
            alerts_page,
            Utc::now(),
        ))
    }

    /// Renders the page as plain text for terminal output.
    #[must_use]
    pub fn render_text(&self) -> String {
        use std::fmt::Write;

        let mut output = format!(
            "Inventory - {} items ({} after filter), page {}/{}\n",
            self.items.len(),
            self.filtered.len(),
            self.bounds.page,
            self.bounds.total_pages.max(1)
        );

        // write! is infallible when writing to String, so unwrap is safe
        for item in &self.page_items {
            writeln!(
                output,
                "  {} | {} | {} | {} in stock | €{:.2}",
                item.sku, item.title, item.category, item.stock_quantity, item.final_price
            )
            .unwrap();
        }

        if !self.alerts.is_empty() {
            writeln!(
                output,
                "Low stock alerts - {} total, page {}/{}",
                self.alerts.len(),
                self.alert_bounds.page,
                self.alert_bounds.total_pages.max(1)
            )
            .unwrap();
            for alert in &self.page_alerts {
                writeln!(
                    output,
                    "  {} | {} | {} left (threshold {})",
                    alert.sku, alert.title, alert.current_stock, alert.threshold
                )
                .unwrap();
            }
        }

        output
    }
}
