//! Favorites page: derived favorite bundles plus their savings roll-up.

use crate::core::derive::{BundleView, derive_feed};
use crate::core::stats::{FavoritesSummary, favorites_summary, format_euro_cents};
use crate::errors::Result;
use crate::pages::DashboardContext;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// The favorited-bundles screen.
pub struct FavoritesPage {
    /// Every favorited bundle, derived, in feed order
    pub bundles: Vec<BundleView>,
    /// Savings, discount, and item roll-up over the favorites
    pub summary: FavoritesSummary,
}

impl FavoritesPage {
    /// Builds the page from an already-fetched favorites payload.
    ///
    /// Favorites skip the minimum-quantity cut of the main list; anything
    /// the user starred stays visible.
    #[must_use]
    pub fn build(payload: &Value, now: DateTime<Utc>) -> Self {
        let bundles = derive_feed(payload, now);
        let summary = favorites_summary(&bundles);

        Self { bundles, summary }
    }

    /// Fetches the favorites feed and builds the page.
    ///
    /// # Errors
    /// Returns an error when the feed fetch fails.
    pub async fn load(context: &DashboardContext) -> Result<Self> {
        let payload = context.client.fetch_favorites().await?;
        Ok(Self::build(&payload, Utc::now()))
    }

    /// Renders the page as plain text for terminal output.
    #[must_use]
    pub fn render_text(&self) -> String {
        use std::fmt::Write;

        let mut output = format!(
            "Favorites - {} bundles | Saved {} | Avg discount {}% | {} items\n",
            self.bundles.len(),
            format_euro_cents(self.summary.total_savings),
            self.summary.average_discount,
            self.summary.total_items
        );

        // write! is infallible when writing to String, so unwrap is safe
        for bundle in &self.bundles {
            writeln!(
                output,
                "  [{}] {} | {} → {}",
                bundle.status.as_str(),
                bundle.name,
                format_euro_cents(bundle.original_price),
                format_euro_cents(bundle.bundle_price)
            )
            .unwrap();
        }

        output
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]

    use super::*;
    use crate::test_utils::{bundle_json, feed_payload, fixed_now};
    use serde_json::json;

    #[test]
    fn test_build_keeps_small_bundles() {
        let mut single = bundle_json("b1", "Lonely Pot");
        single["items"] = json!([{"item_name": "Moka Pot", "qty": 1}]);
        let payload = feed_payload(vec![single]);

        let page = FavoritesPage::build(&payload, fixed_now());
        assert_eq!(page.bundles.len(), 1);
        assert_eq!(page.summary.total_items, 1);
    }

    #[test]
    fn test_build_summary_over_favorites() {
        let payload = feed_payload(vec![
            bundle_json("b1", "Morning Kit"),
            bundle_json("b2", "Night Cap"),
        ]);

        let page = FavoritesPage::build(&payload, fixed_now());
        // Each fixture bundle saves 53.85 at a 35% discount with 3 items
        assert!((page.summary.total_savings - 107.70).abs() < 1e-9);
        assert_eq!(page.summary.average_discount, 35);
        assert_eq!(page.summary.total_items, 6);
    }

    #[test]
    fn test_render_text_headline() {
        let payload = feed_payload(vec![bundle_json("b1", "Morning Kit")]);
        let page = FavoritesPage::build(&payload, fixed_now());

        let text = page.render_text();
        assert!(text.contains("Favorites - 1 bundles"));
        assert!(text.contains("Saved €53.85"));
        assert!(text.contains("Avg discount 35%"));
    }
}
