//! Feed module - typed raw records for the backend JSON payloads.
//! Every backend response passes through one of these tolerant parse steps
//! before any derivation logic sees it, so defaults are applied exactly once.

/// Dashboard stat, revenue-trend, and prediction records
pub mod analytics;
/// Bundle feed records and the tolerant batch parse
pub mod bundle;
/// Spreadsheet-keyed product rows from the inventory endpoint
pub mod inventory;

pub use analytics::{DashboardStats, RevenuePrediction, TrendDay};
pub use bundle::{RawBundle, RawItem, parse_feed};
pub use inventory::{StockRecord, parse_rows};
