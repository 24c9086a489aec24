//! Dashboard settings loading from config.toml
//!
//! This module provides functionality to load display settings from a TOML
//! configuration file. Every field is optional; missing fields keep their
//! built-in defaults, and a missing file yields the full default set.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Display and threshold settings for the dashboard
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
    /// Bundles shown per page
    pub page_size: usize,
    /// Low-stock alerts shown per page
    pub alerts_page_size: usize,
    /// Stock quantity below which an alert is raised
    pub low_stock_threshold: i64,
    /// Minimum total item quantity for a bundle to be listed
    pub min_bundle_quantity: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: 10,
            alerts_page_size: 3,
            low_stock_threshold: 5,
            min_bundle_quantity: 2,
        }
    }
}

/// Loads dashboard settings from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Returns
/// * `Ok(Settings)` - Successfully parsed settings
/// * `Err(Error)` - Failed to read or parse the configuration file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from the default location (./config.toml), falling back to
/// the built-in defaults when the file does not exist.
///
/// # Errors
/// Returns an error only when the file exists but cannot be read or parsed.
pub fn load_default_settings() -> Result<Settings> {
    if Path::new("config.toml").exists() {
        load_settings("config.toml")
    } else {
        Ok(Settings::default())
    }
}
