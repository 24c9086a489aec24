//! Raw analytics payloads: headline stats, revenue trend days, predictions.

use serde::Deserialize;

/// Headline metrics for the dashboard home page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Average value of an order
    #[serde(default)]
    pub avg_order_value: f64,
    /// Total revenue over the reporting window
    #[serde(default)]
    pub total_revenue: f64,
    /// Number of currently active bundles
    #[serde(default)]
    pub active_bundles: i64,
    /// Number of open stock alerts
    #[serde(default)]
    pub stock_alerts: i64,
    /// Revenue change versus the previous window, in percent
    #[serde(default)]
    pub revenue_change: f64,
    /// Average-order-value change versus the previous window, in percent
    #[serde(default)]
    pub aov_change: f64,
}

/// Daily revenue figures for the dashboard trend chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrendDay {
    /// Calendar date, ISO formatted
    #[serde(default)]
    pub date: String,
    /// Revenue taken that day
    #[serde(default)]
    pub revenue: f64,
    /// Orders placed that day
    #[serde(default)]
    pub orders: i64,
    /// Items sold that day
    #[serde(default)]
    pub items: i64,
}

/// Response of the revenue prediction endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RevenuePrediction {
    /// Forecasted revenue for the upcoming window
    #[serde(default)]
    pub predicted_revenue: f64,
}
