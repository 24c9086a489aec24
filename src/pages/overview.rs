//! Overview page: headline stats, revenue trend, and forecast accuracy.

use crate::core::stats::{
    TrendPoint, TrendTotals, forecast_accuracy, format_euro, format_euro_cents, trend_points,
    trend_totals,
};
use crate::errors::Result;
use crate::feed::{DashboardStats, TrendDay};
use crate::pages::DashboardContext;

/// The dashboard home screen.
pub struct OverviewPage {
    /// Headline metrics straight from the backend
    pub stats: DashboardStats,
    /// Labelled revenue trend points, one per day
    pub trend: Vec<TrendPoint>,
    /// Column totals over the trend window
    pub totals: TrendTotals,
    /// Predicted over actual revenue, 7 significant digits, 0 without data
    pub forecast_accuracy: f64,
}

impl OverviewPage {
    /// Builds the page from already-fetched stats, trend days, and revenue
    /// figures.
    #[must_use]
    pub fn build(stats: DashboardStats, days: &[TrendDay], actual: f64, predicted: f64) -> Self {
        Self {
            stats,
            trend: trend_points(days),
            totals: trend_totals(days),
            forecast_accuracy: forecast_accuracy(predicted, actual),
        }
    }

    /// Fetches stats, trend, and revenue figures, then builds the page.
    ///
    /// # Errors
    /// Returns an error when any of the four backend fetches fails.
    pub async fn load(context: &DashboardContext) -> Result<Self> {
        let stats = context.client.fetch_dashboard_stats().await?;
        let days = context.client.fetch_revenue_trend().await?;
        let actual = context.client.fetch_revenue_actual().await?;
        let prediction = context.client.fetch_revenue_prediction().await?;

        Ok(Self::build(
            stats,
            &days,
            actual,
            prediction.predicted_revenue,
        ))
    }

    /// Renders the page as plain text for terminal output.
    #[must_use]
    pub fn render_text(&self) -> String {
        use std::fmt::Write;

        let mut output = format!(
            "Overview - revenue {} ({:+.1}%) | avg order {} ({:+.1}%)\n",
            format_euro(self.stats.total_revenue),
            self.stats.revenue_change,
            format_euro_cents(self.stats.avg_order_value),
            self.stats.aov_change
        );

        // write! is infallible when writing to String, so unwrap is safe
        writeln!(
            output,
            "  Active bundles: {} | Stock alerts: {}",
            self.stats.active_bundles, self.stats.stock_alerts
        )
        .unwrap();
        writeln!(
            output,
            "  Trend ({} days): {} revenue | {} orders | {} items",
            self.trend.len(),
            format_euro(self.totals.revenue),
            self.totals.orders,
            self.totals.items
        )
        .unwrap();
        for point in &self.trend {
            writeln!(
                output,
                "    {}: {} | {} orders",
                point.label,
                format_euro_cents(point.revenue),
                point.orders
            )
            .unwrap();
        }
        writeln!(output, "  Forecast accuracy: {}", self.forecast_accuracy).unwrap();

        output
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]

    use super::*;

    fn sample_stats() -> DashboardStats {
        DashboardStats {
            avg_order_value: 87.5,
            total_revenue: 45_231.0,
            active_bundles: 12,
            stock_alerts: 3,
            revenue_change: 12.3,
            aov_change: -1.2,
        }
    }

    fn sample_days() -> Vec<TrendDay> {
        vec![
            TrendDay {
                date: "2024-01-05".to_owned(),
                revenue: 1200.0,
                orders: 30,
                items: 75,
            },
            TrendDay {
                date: "2024-01-06".to_owned(),
                revenue: 800.0,
                orders: 20,
                items: 50,
            },
        ]
    }

    #[test]
    fn test_build_assembles_trend_and_accuracy() {
        let page = OverviewPage::build(sample_stats(), &sample_days(), 10_000.0, 12_345.678);

        assert_eq!(page.trend.len(), 2);
        assert_eq!(page.trend[0].label, "05 Jan");
        assert_eq!(page.totals.revenue, 2000.0);
        assert_eq!(page.totals.orders, 50);
        assert_eq!(page.forecast_accuracy, 1.234_568);
    }

    #[test]
    fn test_build_without_revenue_data() {
        let page = OverviewPage::build(sample_stats(), &[], 0.0, 12_345.678);

        assert!(page.trend.is_empty());
        assert_eq!(page.totals.orders, 0);
        assert_eq!(page.forecast_accuracy, 0.0);
    }

    #[test]
    fn test_render_text_headline_formatting() {
        let page = OverviewPage::build(sample_stats(), &sample_days(), 10_000.0, 12_345.678);

        let text = page.render_text();
        assert!(text.contains("revenue €45,231 (+12.3%)"));
        assert!(text.contains("avg order €87.50 (-1.2%)"));
        assert!(text.contains("Active bundles: 12 | Stock alerts: 3"));
        assert!(text.contains("Trend (2 days): €2,000 revenue | 50 orders | 125 items"));
        assert!(text.contains("05 Jan: €1200.00 | 30 orders"));
        assert!(text.contains("Forecast accuracy: 1.234568"));
    }
}
