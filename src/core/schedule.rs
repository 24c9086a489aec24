//! Calendar parsing for bundle scheduling.
//!
//! Bundles describe their lifetime in free text: a duration like "2 months"
//! or the "until stock runs out" sentinel, and a season range like
//! "September–November". This module turns that text into month indices and
//! concrete offer windows; the status rules on top of it live in
//! [`crate::core::classify`].

use chrono::{DateTime, Duration, Months, Utc};

/// Canonical English month names, index 0 = January.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Sentinel duration meaning the bundle never expires on its own.
pub const STOCK_SENTINEL: &str = "until stock runs out";

/// Default offer horizon when no explicit duration span is given.
const DEFAULT_HORIZON_MONTHS: u32 = 6;

/// Time unit accepted in a duration descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    /// Seven-day weeks
    Weeks,
    /// Calendar months
    Months,
}

/// A season window as zero-based month indices. Windows never wrap the year
/// boundary: `start` and `end` are compared as plain indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonWindow {
    /// First month of the window
    pub start: usize,
    /// Last month of the window
    pub end: usize,
}

impl SeasonWindow {
    /// Whether the zero-based month index falls inside the window.
    #[must_use]
    pub const fn contains(self, month: usize) -> bool {
        self.start <= month && month <= self.end
    }
}

/// Zero-based index of a month name in the canonical list.
///
/// Matching is exact after trimming; abbreviations and case variants do not
/// match (they fall through to the caller's fallback handling).
#[must_use]
pub fn month_index(name: &str) -> Option<usize> {
    let trimmed = name.trim();
    MONTH_NAMES.iter().position(|month| *month == trimmed)
}

/// Parses a season range like "September–November" into month indices.
///
/// The en-dash separator is preferred when present, otherwise a hyphen is
/// tried. Only the first two segments count; both must name a canonical
/// month. Returns `None` for anything else.
#[must_use]
pub fn parse_season_window(text: &str) -> Option<SeasonWindow> {
    let separator = if text.contains('–') { '–' } else { '-' };
    let mut parts = text.split(separator);
    let start = month_index(parts.next()?)?;
    let end = month_index(parts.next()?)?;
    Some(SeasonWindow { start, end })
}

/// True when the duration text contains the "until stock runs out" sentinel.
#[must_use]
pub fn is_stock_sentinel(duration: &str) -> bool {
    duration.to_lowercase().contains(STOCK_SENTINEL)
}

/// Scans free text for the first `<integer> week|month` span.
///
/// The unit may be separated from the number by whitespace and may carry a
/// plural "s": "3 weeks", "1 month", and "2months" all match. Numbers not
/// followed by a unit are skipped and the scan continues.
#[must_use]
pub fn parse_duration_span(text: &str) -> Option<(u32, DurationUnit)> {
    let lower = text.to_lowercase();
    let bytes = lower.as_bytes();
    let mut index = 0;

    while index < bytes.len() {
        if bytes[index].is_ascii_digit() {
            let digits_start = index;
            while index < bytes.len() && bytes[index].is_ascii_digit() {
                index += 1;
            }
            let count = lower[digits_start..index].parse::<u32>().ok();
            let rest = lower[index..].trim_start();
            let unit = if rest.starts_with("week") {
                Some(DurationUnit::Weeks)
            } else if rest.starts_with("month") {
                Some(DurationUnit::Months)
            } else {
                None
            };
            if let (Some(count), Some(unit)) = (count, unit) {
                return Some((count, unit));
            }
        } else {
            index += 1;
        }
    }

    None
}

/// Computes the bundle's offer window.
///
/// The start is always `now`. An explicit `<n> week|month` duration sets the
/// end that far ahead; the stock sentinel, an absent duration, and free text
/// with no recognizable span all fall back to the default 6-month horizon.
#[must_use]
pub fn bundle_window(
    duration: Option<&str>,
    now: DateTime<Utc>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let span = duration
        .filter(|text| !is_stock_sentinel(text))
        .and_then(parse_duration_span);

    let end = match span {
        Some((count, DurationUnit::Weeks)) => now + Duration::weeks(i64::from(count)),
        Some((count, DurationUnit::Months)) => add_months(now, count),
        None => add_months(now, DEFAULT_HORIZON_MONTHS),
    };

    (now, end)
}

/// Adds calendar months, clamping the day to the target month's length
/// (January 31st + 1 month lands on the last day of February).
fn add_months(moment: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    moment
        .checked_add_months(Months::new(months))
        .unwrap_or(moment)
}
