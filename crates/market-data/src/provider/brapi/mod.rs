//! Brapi market data provider implementation.
//!
//! Brapi serves B3 (Brazilian exchange) quotes, including listed real-estate
//! funds, through a single endpoint: `GET {base_url}/{ticker}`. An API token
//! is optional for a handful of free tickers and required for the rest; it
//! is passed as the `token` query parameter.

mod models;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};
use urlencoding::encode;

use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::{MarketDataProvider, RateLimit};

use models::{BrapiErrorResponse, BrapiQuoteResponse, BrapiQuoteResult};

pub const DEFAULT_BASE_URL: &str = "https://brapi.dev/api/quote";
const PROVIDER_ID: &str = "BRAPI";
const SOURCE_LABEL: &str = "brapi";
const USER_AGENT: &str = "fiifolio/1.0";

// ============================================================================
// BrapiProvider
// ============================================================================

/// Brapi quote provider.
///
/// Requests are paced so that two requests never start closer together than
/// `RateLimit::min_delay`, whatever the caller's concurrency.
pub struct BrapiProvider {
    client: Client,
    base_url: String,
    token: Option<String>,
    last_request: Mutex<Option<Instant>>,
}

impl BrapiProvider {
    /// Create a new provider against `base_url` with an optional API token.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
            last_request: Mutex::new(None),
        }
    }

    /// Provider against the public endpoint.
    pub fn with_default_url(token: Option<String>) -> Self {
        Self::new(DEFAULT_BASE_URL, token)
    }

    fn quote_url(&self, ticker: &str) -> String {
        format!("{}/{}", self.base_url, encode(ticker))
    }

    /// Sleep until `min_delay` has elapsed since the previous request started.
    async fn pace(&self) {
        let min_delay = self.rate_limit().min_delay;
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < min_delay {
                tokio::time::sleep(min_delay - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    async fn fetch(&self, ticker: &str) -> Result<String, MarketDataError> {
        self.pace().await;

        let mut request = self
            .client
            .get(self.quote_url(ticker))
            .header(reqwest::header::USER_AGENT, USER_AGENT);
        if let Some(token) = &self.token {
            request = request.query(&[("token", token.as_str())]);
        }

        debug!("Brapi request for {}", ticker);

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("Request failed: {}", e),
                }
            }
        })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        // Brapi answers 404 for unknown tickers
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(MarketDataError::SymbolNotFound(ticker.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<BrapiErrorResponse>(&body)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("HTTP {} - {}", status, body));
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message,
            });
        }

        response
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to read response: {}", e),
            })
    }
}

/// Normalise `regularMarketTime` to text.
///
/// Numbers are unix seconds and are rendered as RFC 3339 so that the caller
/// only has to understand one format.
fn market_time_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .map(|dt| dt.to_rfc3339()),
        _ => None,
    }
}

/// Convert a parsed result into a quote, rejecting results without a price.
fn quote_from_result(ticker: &str, result: BrapiQuoteResult) -> Result<Quote, MarketDataError> {
    let symbol = match result.symbol {
        Some(symbol) if !symbol.is_empty() => symbol,
        _ => return Err(MarketDataError::SymbolNotFound(ticker.to_string())),
    };

    let price = match result.regular_market_price {
        Some(price) if price.is_finite() && price > 0.0 => price,
        _ => {
            warn!("Brapi returned {} without a usable price", symbol);
            return Err(MarketDataError::SymbolNotFound(ticker.to_string()));
        }
    };

    Ok(Quote {
        symbol,
        price,
        change: result.regular_market_change,
        change_percent: result.regular_market_change_percent,
        volume: result.regular_market_volume,
        market_time: market_time_text(result.regular_market_time),
        week_52_high: result.fifty_two_week_high,
        week_52_low: result.fifty_two_week_low,
        book_value_per_share: result.book_value,
        price_to_book: result.price_to_book,
        source: SOURCE_LABEL.to_string(),
    })
}

/// Parse a response body into the first quote it contains.
fn parse_quote_body(ticker: &str, body: &str) -> Result<Quote, MarketDataError> {
    let response: BrapiQuoteResponse =
        serde_json::from_str(body).map_err(|e| MarketDataError::ValidationFailed {
            message: format!("Invalid Brapi response for {}: {}", ticker, e),
        })?;

    let result = response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| MarketDataError::SymbolNotFound(ticker.to_string()))?;

    quote_from_result(ticker, result)
}

#[async_trait]
impl MarketDataProvider for BrapiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn rate_limit(&self) -> RateLimit {
        RateLimit {
            max_concurrency: 4,
            min_delay: Duration::from_millis(250),
        }
    }

    async fn get_latest_quote(&self, ticker: &str) -> Result<Quote, MarketDataError> {
        let body = self.fetch(ticker).await?;
        parse_quote_body(ticker, &body)
    }
}
