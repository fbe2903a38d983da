//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while fetching a quote.
///
/// Every variant describes the failure of a single ticker. Callers running a
/// batch are expected to log the error and move on to the next ticker.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider does not know the symbol, or returned it without a price.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider answered but the payload could not be understood.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Whether a later attempt could plausibly succeed.
    ///
    /// Rate limits, timeouts and network failures are transient; an unknown
    /// symbol or a malformed payload will fail the same way next time.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Timeout { .. } | Self::Network(_)
        )
    }
}
