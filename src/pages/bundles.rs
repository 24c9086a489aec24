//! Bundle list page: minimum-quantity cut, derivation, and filtering.

use crate::core::derive::{BundleView, derive_bundles};
use crate::core::filter::{BundleFilter, filter_bundles};
use crate::core::stats::format_euro_cents;
use crate::errors::Result;
use crate::feed::parse_feed;
use crate::pages::DashboardContext;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// The bundle list screen.
pub struct BundlesPage {
    /// Every derived bundle that met the minimum item quantity, in feed order
    pub bundles: Vec<BundleView>,
    /// The subset passing the active filter, in the same order
    pub visible: Vec<BundleView>,
}

impl BundlesPage {
    /// Builds the page from an already-fetched feed payload.
    ///
    /// Bundles whose summed item quantity falls below `min_quantity` are cut
    /// before derivation; they are single-product offers the dashboard does
    /// not list.
    #[must_use]
    pub fn build(
        payload: &Value,
        filter: &BundleFilter,
        min_quantity: i64,
        now: DateTime<Utc>,
    ) -> Self {
        let records: Vec<_> = parse_feed(payload)
            .into_iter()
            .filter(|record| record.total_quantity() >= min_quantity)
            .collect();
        let bundles = derive_bundles(&records, now);
        let visible = filter_bundles(&bundles, filter);

        Self { bundles, visible }
    }

    /// Fetches the bundle feed and builds the page.
    ///
    /// # Errors
    /// Returns an error when the feed fetch fails; a fetched but partially
    /// malformed feed still builds (bad records are dropped with a warning).
    pub async fn load(context: &DashboardContext, filter: &BundleFilter) -> Result<Self> {
        let payload = context.client.fetch_bundles().await?;
        Ok(Self::build(
            &payload,
            filter,
            context.settings.min_bundle_quantity,
            Utc::now(),
        ))
    }

    /// Renders the page as plain text for terminal output.
    #[must_use]
    pub fn render_text(&self) -> String {
        use std::fmt::Write;

        let mut output = format!(
            "Bundles - showing {} of {}\n",
            self.visible.len(),
            self.bundles.len()
        );

        // write! is infallible when writing to String, so unwrap is safe
        for bundle in &self.visible {
            writeln!(
                output,
                "  [{}] {} ({}) | {} → {} (-{}%) | {} items",
                bundle.status.as_str(),
                bundle.name,
                bundle.kind.label(),
                format_euro_cents(bundle.original_price),
                format_euro_cents(bundle.bundle_price),
                bundle.discount_percent,
                bundle.item_count
            )
            .unwrap();
        }

        output
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::core::classify::BundleStatus;
    use crate::core::filter::StatusFilter;
    use crate::test_utils::{bundle_json, feed_payload, fixed_now};
    use serde_json::json;

    #[test]
    fn test_build_cuts_below_minimum_quantity() {
        let mut single = bundle_json("b2", "Lonely Pot");
        single["items"] = json!([{"item_name": "Moka Pot", "qty": 1}]);
        let payload = feed_payload(vec![bundle_json("b1", "Morning Kit"), single]);

        let page = BundlesPage::build(&payload, &BundleFilter::default(), 2, fixed_now());
        assert_eq!(page.bundles.len(), 1);
        assert_eq!(page.bundles[0].id, "b1");
    }

    #[test]
    fn test_build_applies_filter() {
        let payload = feed_payload(vec![
            bundle_json("b1", "Morning Kit"),
            bundle_json("b2", "Night Cap"),
        ]);
        let filter = BundleFilter {
            query: "night".to_owned(),
            status: StatusFilter::All,
        };

        let page = BundlesPage::build(&payload, &filter, 2, fixed_now());
        assert_eq!(page.bundles.len(), 2);
        assert_eq!(page.visible.len(), 1);
        assert_eq!(page.visible[0].id, "b2");
    }

    #[test]
    fn test_build_status_filter() {
        let payload = feed_payload(vec![bundle_json("b1", "Morning Kit")]);
        let filter = BundleFilter {
            query: String::new(),
            status: StatusFilter::Only(BundleStatus::Scheduled),
        };

        // The fixture bundle is active in June, so nothing is visible
        let page = BundlesPage::build(&payload, &filter, 2, fixed_now());
        assert!(page.visible.is_empty());
    }

    #[test]
    fn test_render_text_lists_visible_bundles() {
        let payload = feed_payload(vec![bundle_json("b1", "Morning Kit")]);
        let page = BundlesPage::build(&payload, &BundleFilter::default(), 2, fixed_now());

        let text = page.render_text();
        assert!(text.contains("showing 1 of 1"));
        assert!(text.contains("[active] Morning Kit (Complementary)"));
        assert!(text.contains("€153.85 → €100.00"));
        assert!(text.contains("3 items"));
    }

    #[test]
    fn test_empty_payload_builds_empty_page() {
        let page = BundlesPage::build(
            &json!({"unexpected": true}),
            &BundleFilter::default(),
            2,
            fixed_now(),
        );
        assert!(page.bundles.is_empty());
        assert!(page.visible.is_empty());
    }
}
