use serde::{Deserialize, Serialize};

/// Latest quote for a ticker as reported by a provider.
///
/// `market_time` is kept as the provider's raw text: deciding which calendar
/// day a quote belongs to (and what to do when the provider's timestamp is
/// missing or garbled) is a domain decision made by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Ticker as echoed back by the provider
    pub symbol: String,

    /// Last traded price (required)
    pub price: f64,

    /// Absolute change versus previous close
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,

    /// Percentage change versus previous close
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,

    /// Traded volume for the session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,

    /// Provider trade timestamp, unparsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_52_high: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_52_low: Option<f64>,

    /// Book value per share (VP/cota)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_value_per_share: Option<f64>,

    /// Price-to-book (P/VP) when the provider computes it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_to_book: Option<f64>,

    /// Source label (e.g. "brapi")
    pub source: String,
}

impl Quote {
    /// Create a quote with only the required fields set
    pub fn new(symbol: impl Into<String>, price: f64, source: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            change: None,
            change_percent: None,
            volume: None,
            market_time: None,
            week_52_high: None,
            week_52_low: None,
            book_value_per_share: None,
            price_to_book: None,
            source: source.into(),
        }
    }
}
