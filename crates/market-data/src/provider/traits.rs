//! Market data provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::Quote;

use super::capabilities::RateLimit;

/// Trait for market data providers.
///
/// Implement this trait to add support for a new quote source. A provider is
/// treated as unreliable per call: any ticker may fail independently of the
/// others.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use fiifolio_market_data::{MarketDataError, MarketDataProvider, Quote, RateLimit};
///
/// struct FixedProvider;
///
/// #[async_trait]
/// impl MarketDataProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     fn rate_limit(&self) -> RateLimit {
///         RateLimit::default()
///     }
///
///     async fn get_latest_quote(&self, ticker: &str) -> Result<Quote, MarketDataError> {
///         Ok(Quote::new(ticker, 10.0, "fixed"))
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "BRAPI". Used for logging and error
    /// attribution.
    fn id(&self) -> &'static str;

    /// Rate limiting configuration.
    fn rate_limit(&self) -> RateLimit;

    /// Fetch the latest quote for a ticker.
    ///
    /// Returns `MarketDataError::SymbolNotFound` when the provider has no
    /// usable quote (unknown symbol, or no price).
    async fn get_latest_quote(&self, ticker: &str) -> Result<Quote, MarketDataError>;
}
