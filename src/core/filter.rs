//! Search, status filtering, and pagination over derived bundles.

use crate::core::classify::BundleStatus;
use crate::core::derive::BundleView;

/// Which lifecycle states a filter lets through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Every status passes
    #[default]
    All,
    /// Only the given status passes
    Only(BundleStatus),
}

/// Criteria applied to a list of derived bundles.
///
/// The default filter passes everything.
#[derive(Debug, Clone, Default)]
pub struct BundleFilter {
    /// Case-insensitive text matched against name and description
    pub query: String,
    /// Lifecycle state restriction
    pub status: StatusFilter,
}

impl BundleFilter {
    /// Returns true when the bundle satisfies both the query and the status
    /// restriction. A blank query matches everything.
    #[must_use]
    pub fn matches(&self, bundle: &BundleView) -> bool {
        let query = self.query.trim().to_lowercase();
        let query_hit = query.is_empty()
            || bundle.name.to_lowercase().contains(&query)
            || bundle.description.to_lowercase().contains(&query);

        let status_hit = match self.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => bundle.status == status,
        };

        query_hit && status_hit
    }
}

/// Applies a filter to a slice of bundles, preserving order.
#[must_use]
pub fn filter_bundles(bundles: &[BundleView], filter: &BundleFilter) -> Vec<BundleView> {
    bundles
        .iter()
        .filter(|bundle| filter.matches(bundle))
        .cloned()
        .collect()
}

/// Resolved slice boundaries for one page of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    /// 1-based page actually shown, after clamping the request
    pub page: usize,
    /// Total number of pages; zero for an empty list, though `page` stays 1
    pub total_pages: usize,
    /// Index of the first item on the page
    pub start: usize,
    /// Index one past the last item on the page
    pub end: usize,
}

impl PageBounds {
    /// Computes bounds for a page of `total` items.
    ///
    /// A `per_page` of zero is treated as one. Out-of-range page requests
    /// clamp to the nearest valid page rather than erroring, so a stale page
    /// number after a filter change still renders something sensible.
    #[must_use]
    pub fn compute(total: usize, per_page: usize, requested_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total.div_ceil(per_page);
        let page = requested_page.clamp(1, total_pages.max(1));
        let start = (page - 1) * per_page;
        let end = (start + per_page).min(total);

        Self {
            page,
            total_pages,
            start,
            end,
        }
    }
}

/// Returns the sub-slice selected by the given bounds.
#[must_use]
pub fn page_slice<'a, T>(items: &'a [T], bounds: &PageBounds) -> &'a [T] {
    let start = bounds.start.min(items.len());
    let end = bounds.end.min(items.len());
    &items[start..end]
}
