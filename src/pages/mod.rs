//! Page layer - dashboard screens assembled from fetched feed data
//!
//! Each page type pairs a pure `build` over already-fetched values with a
//! thin async `load` that fetches through the shared client and delegates to
//! `build`. Rendering is plain text for terminal output; all layout decisions
//! live here, not in `core`.

/// Bundle list with search, status filter, and minimum-quantity cut
pub mod bundles;
/// Favorited bundles with their savings roll-up
pub mod favorites;
/// Stock table with category/level filters, pagination, and alerts
pub mod inventory;
/// Headline stats, revenue trend, and forecast accuracy
pub mod overview;

use crate::api::BackendClient;
use crate::config::settings::Settings;

/// Shared data available to all page loads.
/// This structure holds the backend client and the display settings that
/// page assembly needs to access.
pub struct DashboardContext {
    /// Client for all backend requests
    pub client: BackendClient,
    /// Display and threshold settings
    pub settings: Settings,
}

impl DashboardContext {
    /// Creates a new `DashboardContext` with the given client and settings.
    /// This is typically called once during startup to set up the shared
    /// context for all pages.
    #[must_use]
    pub const fn new(client: BackendClient, settings: Settings) -> Self {
        Self { client, settings }
    }
}
