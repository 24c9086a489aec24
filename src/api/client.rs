//! HTTP client for the bundle backend.
//!
//! This module wraps the backend's REST surface in typed async methods. All
//! methods share one connection pool and one base URL, and all responses pass
//! through the same decoding path: non-2xx statuses surface as
//! [`Error::Backend`] with the body text, and double-encoded JSON payloads
//! (a JSON string whose content is itself JSON) are transparently unwrapped
//! one level before typed decoding.

use crate::errors::{Error, Result};
use crate::feed::{DashboardStats, RevenuePrediction, TrendDay};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

/// Parameters for custom bundle generation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateParams {
    /// Product the bundles should be built around
    pub product_name: String,
    /// Target profit margin percentage
    pub profit_margin: f64,
    /// Optimization objective, "Max Cart" or "Sell Out"
    pub objective: String,
    /// How many bundles to generate
    pub quantity: i64,
    /// Free-text timeframe hint, e.g. "2 months"
    pub timeframe: String,
    /// Restrict generation to one bundle type; "all" for no restriction
    pub bundle_type: String,
    /// Target customer segments
    pub customer_segments: Vec<String>,
}

/// Async client over the bundle backend's REST endpoints.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Creates a client for the given base URL.
    ///
    /// A trailing slash on the base URL is tolerated and stripped, so path
    /// concatenation never produces a double slash.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Fetches the current bundle feed.
    ///
    /// # Errors
    /// Returns an error on connection failure, a non-2xx status, or an
    /// undecodable body.
    pub async fn fetch_bundles(&self) -> Result<Value> {
        self.get_json("/bundles").await
    }

    /// Asks the backend to generate a fresh default set of bundles.
    pub async fn generate_bundles(&self) -> Result<Value> {
        self.post_json("/bundles/generate", &json!({})).await
    }

    /// Asks the backend to generate bundles for specific parameters.
    pub async fn generate_custom_bundles(&self, params: &GenerateParams) -> Result<Value> {
        self.post_json("/bundles/data", params).await
    }

    /// Deletes a bundle by id.
    pub async fn delete_bundle(&self, bundle_id: &str) -> Result<Value> {
        self.post_json("/bundles/delete", &json!({ "bundle_id": bundle_id }))
            .await
    }

    /// Fetches the favorites feed, shaped like the bundle feed.
    pub async fn fetch_favorites(&self) -> Result<Value> {
        self.get_json("/bundles/favorites").await
    }

    /// Marks or unmarks a bundle as a favorite.
    pub async fn set_favorite(&self, bundle_id: &str, is_favorite: bool) -> Result<Value> {
        self.post_json(
            "/bundles/favorite",
            &json!({ "bundle_id": bundle_id, "is_favorite": is_favorite }),
        )
        .await
    }

    /// Checks whether a bundle is currently favorited.
    ///
    /// A missing or malformed `is_favorite` field reads as false.
    pub async fn favorite_status(&self, bundle_id: &str) -> Result<bool> {
        let value = self.get_json(&format!("/bundles/favorite/{bundle_id}")).await?;
        Ok(value
            .get("is_favorite")
            .and_then(Value::as_bool)
            .unwrap_or(false))
    }

    /// Fetches the raw inventory rows.
    pub async fn fetch_inventory(&self) -> Result<Value> {
        self.get_json("/inventory").await
    }

    /// Fetches the headline dashboard statistics.
    pub async fn fetch_dashboard_stats(&self) -> Result<DashboardStats> {
        let value = self.get_json("/dashboard/stats").await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetches the per-day revenue trend rows.
    pub async fn fetch_revenue_trend(&self) -> Result<Vec<TrendDay>> {
        let value = self.get_json("/dashboard/revenue-trend").await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetches total actual revenue as a bare number.
    ///
    /// A non-numeric body reads as zero, which downstream accuracy math
    /// treats as "no data".
    pub async fn fetch_revenue_actual(&self) -> Result<f64> {
        let value = self.get_json("/analytics").await?;
        Ok(value.as_f64().unwrap_or(0.0))
    }

    /// Fetches the revenue prediction record.
    pub async fn fetch_revenue_prediction(&self) -> Result<RevenuePrediction> {
        let value = self.get_json("/analytics-prediction").await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "GET");
        let response = self.http.get(&url).send().await?;
        decode(response).await
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Value> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "POST");
        let response = self.http.post(&url).json(body).send().await?;
        decode(response).await
    }
}

/// Turns a raw response into a JSON value, surfacing backend failures.
async fn decode(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(Error::Backend {
            status: status.as_u16(),
            message: text,
        });
    }

    parse_body(&text)
}

/// Parses a response body, unwrapping one level of string nesting.
fn parse_body(text: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(text)?;
    if let Value::String(nested) = value {
        return Ok(serde_json::from_str(&nested)?);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]

    use super::*;

    #[test]
    fn test_new_strips_trailing_slash() {
        let client = BackendClient::new("http://localhost:5000/");
        assert_eq!(client.base_url, "http://localhost:5000");

        let client = BackendClient::new("http://localhost:5000");
        assert_eq!(client.base_url, "http://localhost:5000");
    }

    #[test]
    fn test_parse_body_plain_json() {
        let value = parse_body(r#"{"bundles": []}"#).unwrap();
        assert!(value.get("bundles").is_some());
    }

    #[test]
    fn test_parse_body_unwraps_double_encoding() {
        // The backend sometimes returns a JSON string containing JSON
        let value = parse_body(r#""{\"bundles\": [{\"bundle_id\": \"b1\"}]}""#).unwrap();
        assert_eq!(value["bundles"][0]["bundle_id"], "b1");
    }

    #[test]
    fn test_parse_body_bare_number() {
        let value = parse_body("1234.5").unwrap();
        assert_eq!(value.as_f64().unwrap(), 1234.5);
    }

    #[test]
    fn test_parse_body_rejects_non_json() {
        assert!(parse_body("not json at all").is_err());
    }

    #[test]
    fn test_generate_params_serialize_with_backend_field_names() {
        let params = GenerateParams {
            product_name: "Espresso Beans".to_owned(),
            profit_margin: 35.0,
            objective: "Max Cart".to_owned(),
            quantity: 5,
            timeframe: "2 months".to_owned(),
            bundle_type: "all".to_owned(),
            customer_segments: vec!["students".to_owned()],
        };

        let value = serde_json::to_value(&params).unwrap();
        let object = value.as_object().unwrap();
        for key in [
            "product_name",
            "profit_margin",
            "objective",
            "quantity",
            "timeframe",
            "bundle_type",
            "customer_segments",
        ] {
            assert!(object.contains_key(key), "missing key {key}");
        }
        assert_eq!(object["objective"], "Max Cart");
    }
}
