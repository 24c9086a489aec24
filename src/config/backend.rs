//! Backend endpoint configuration from environment variables.
//!
//! The dashboard talks to a single bundle backend. Its base URL comes from
//! the `BUNDLE_API_URL` environment variable (typically via `.env`), falling
//! back to the local development server.

/// Base URL used when `BUNDLE_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Gets the backend base URL from the environment or the local default.
///
/// This function looks for `BUNDLE_API_URL` in the environment and falls back
/// to [`DEFAULT_API_URL`] if not found.
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("BUNDLE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}
