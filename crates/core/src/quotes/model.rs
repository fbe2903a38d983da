//! Domain models for stored market quotes.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::analytics::position_in_52_week_range;

/// Daily quote for a held asset. Unique per `(user_id, asset_id, date)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketQuote {
    pub id: String,
    pub user_id: String,
    pub asset_id: String,
    pub date: NaiveDate,
    pub price: Option<f64>,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
    pub volume: Option<f64>,
    pub week_52_high: Option<f64>,
    pub week_52_low: Option<f64>,
    pub source: Option<String>,
    pub created_at: NaiveDateTime,
}

impl MarketQuote {
    pub fn recency_key(&self) -> (NaiveDate, NaiveDateTime) {
        (self.date, self.created_at)
    }

    /// Where the price sits between the 52-week low (0) and high (1).
    pub fn position_52w(&self) -> Option<f64> {
        position_in_52_week_range(self.price, self.week_52_low, self.week_52_high)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewMarketQuote {
    pub user_id: String,
    pub asset_id: String,
    pub date: NaiveDate,
    pub price: Option<f64>,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
    pub volume: Option<f64>,
    pub week_52_high: Option<f64>,
    pub week_52_low: Option<f64>,
    pub source: Option<String>,
}

/// Daily quote for a catalog entry. Unique per `(user_id, catalog_id, date)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuote {
    pub id: String,
    pub user_id: String,
    pub catalog_id: String,
    pub date: NaiveDate,
    pub price: Option<f64>,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
    pub volume: Option<f64>,
    pub week_52_high: Option<f64>,
    pub week_52_low: Option<f64>,
    pub source: Option<String>,
    pub created_at: NaiveDateTime,
}

impl CatalogQuote {
    pub fn recency_key(&self) -> (NaiveDate, NaiveDateTime) {
        (self.date, self.created_at)
    }

    pub fn position_52w(&self) -> Option<f64> {
        position_in_52_week_range(self.price, self.week_52_low, self.week_52_high)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewCatalogQuote {
    pub user_id: String,
    pub catalog_id: String,
    pub date: NaiveDate,
    pub price: Option<f64>,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
    pub volume: Option<f64>,
    pub week_52_high: Option<f64>,
    pub week_52_low: Option<f64>,
    pub source: Option<String>,
}

/// Outcome of a reconciliation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationSummary {
    pub updated_assets: usize,
    pub updated_catalog: usize,
    pub updated_valuations: usize,
    pub tickers: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ReconciliationSummary {
    pub fn nothing_to_do(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }
}
