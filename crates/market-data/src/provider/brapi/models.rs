//! Brapi API response models.

use serde::Deserialize;
use serde_json::Value;

/// Response wrapper for the /quote/{tickers} endpoint
#[derive(Debug, Deserialize)]
pub struct BrapiQuoteResponse {
    #[serde(default)]
    pub results: Vec<BrapiQuoteResult>,
    // Note: requestedAt and took exist but are not used
}

/// A single quote result
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrapiQuoteResult {
    pub symbol: Option<String>,
    pub regular_market_price: Option<f64>,
    pub regular_market_change: Option<f64>,
    pub regular_market_change_percent: Option<f64>,
    pub regular_market_volume: Option<f64>,
    /// ISO-8601 text on current API versions, unix seconds on older ones
    pub regular_market_time: Option<Value>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub book_value: Option<f64>,
    pub price_to_book: Option<f64>,
}

/// Error body returned alongside non-success statuses
#[derive(Debug, Deserialize)]
pub struct BrapiErrorResponse {
    pub message: Option<String>,
}
