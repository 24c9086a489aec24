//! Status and type classification for derived bundles.
//!
//! Both classifiers are ordered rule chains: the first matching rule wins and
//! the precedence is part of the contract, so each rule is independently
//! testable.

use crate::core::schedule;
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

/// Lifecycle state of a bundle as shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleStatus {
    /// Currently purchasable
    Active,
    /// Outside its season, past its window, or lacking scheduling data
    Inactive,
    /// Season starts later in the year
    Scheduled,
}

impl BundleStatus {
    /// Wire and display form: "active", "inactive", or "scheduled".
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Scheduled => "scheduled",
        }
    }
}

/// Marketing category of a bundle, classified from its rationale text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BundleKind {
    /// No recognizable category ("all" on the wire)
    #[serde(rename = "all")]
    Default,
    /// Quantity-driven discount
    Volume,
    /// Pairs a popular product with related ones
    CrossSell,
    /// Tied to a season or holiday
    Seasonal,
    /// Products that complete each other
    Complementary,
    /// Built around a shared theme
    Thematic,
}

/// Keyword rules for [`classify_kind`], highest priority first.
const KIND_RULES: [(&str, BundleKind); 5] = [
    ("volume", BundleKind::Volume),
    ("cross-sell", BundleKind::CrossSell),
    ("seasonal", BundleKind::Seasonal),
    ("complementary", BundleKind::Complementary),
    ("theme", BundleKind::Thematic),
];

impl BundleKind {
    /// Wire form, matching the filter values the dashboard uses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "all",
            Self::Volume => "volume",
            Self::CrossSell => "cross-sell",
            Self::Seasonal => "seasonal",
            Self::Complementary => "complementary",
            Self::Thematic => "thematic",
        }
    }

    /// Human-readable label for cards and dropdowns.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Volume => "Volume",
            Self::CrossSell => "Cross-sell",
            Self::Seasonal => "Seasonal",
            Self::Complementary => "Complementary",
            Self::Thematic => "Thematic",
        }
    }
}

/// Classifies a bundle's marketing category from its free-text rationale.
///
/// Case-insensitive substring scan in priority order; the first matching
/// keyword wins. Empty or unrecognized text maps to [`BundleKind::Default`].
#[must_use]
pub fn classify_kind(rationale: &str) -> BundleKind {
    let haystack = rationale.to_lowercase();
    KIND_RULES
        .iter()
        .find(|(keyword, _)| haystack.contains(keyword))
        .map_or(BundleKind::Default, |(_, kind)| *kind)
}

/// Classifies a bundle's lifecycle status from its duration and season text.
///
/// Decision order:
/// 1. missing duration or season → inactive
/// 2. duration contains "until stock runs out" → active
/// 3. season parses as a month range → compare the current month against it
///    (`start ≤ now ≤ end` active, earlier scheduled, later inactive; ranges
///    never wrap the year boundary)
/// 4. any other non-empty season → active (treated as an always-on label)
#[must_use]
pub fn classify_status(
    duration: Option<&str>,
    season: Option<&str>,
    now: DateTime<Utc>,
) -> BundleStatus {
    let (Some(duration), Some(season)) = (duration, season) else {
        return BundleStatus::Inactive;
    };

    if schedule::is_stock_sentinel(duration) {
        return BundleStatus::Active;
    }

    let current = now.month0() as usize;
    match schedule::parse_season_window(season) {
        Some(window) if window.contains(current) => BundleStatus::Active,
        Some(window) if current < window.start => BundleStatus::Scheduled,
        Some(_) => BundleStatus::Inactive,
        None => BundleStatus::Active,
    }
}
