//! Core business logic - framework-agnostic bundle derivation, filtering,
//! inventory, and statistics operations.
//!
//! Everything in this module is pure: functions take parsed feed records plus
//! an explicit `now` and return display-ready values, with no I/O and no
//! global state. The HTTP layer lives in `crate::api`; page assembly lives in
//! `crate::pages`.

/// Status and type classification from free-text fields
pub mod classify;
/// Raw-to-display bundle derivation
pub mod derive;
/// Search, status filtering, and pagination
pub mod filter;
/// Stock items, low-stock alerts, and inventory filtering
pub mod inventory;
/// Season windows, duration parsing, and date arithmetic
pub mod schedule;
/// Dashboard roll-ups and euro formatting
pub mod stats;
