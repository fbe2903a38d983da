//! View models for the dashboard, analysis and market screens.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::Signal;
use crate::assets::{AssetType, CatalogAsset};
use crate::errors::{Error, Result};
use crate::fundamentals::Fundamentals;
use crate::quotes::{CatalogQuote, MarketQuote};
use crate::utils::MonthKey;
use crate::valuations::Valuation;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyIncomePoint {
    pub month: MonthKey,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConcentrationEntry {
    /// Ticker for asset entries, type name for type entries.
    pub label: String,
    pub share: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Mover {
    pub ticker: String,
    pub change_percent: f64,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRow {
    pub asset_id: String,
    pub ticker: String,
    #[serde(rename = "type")]
    pub asset_type: Option<AssetType>,
    pub invested: f64,
    pub market_price: Option<f64>,
    pub market_value: Option<f64>,
    pub price_gap: Option<f64>,
    pub dy_12m: f64,
    pub change_percent: Option<f64>,
    pub opportunity_score: Option<u8>,
    pub signal: Signal,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub invested_value: f64,
    pub income_by_month: Vec<MonthlyIncomePoint>,
    pub last_month_income: f64,
    pub average_income_6m: f64,
    pub average_income_12m: f64,
    pub goal_amount: f64,
    pub goal_progress: f64,
    pub market_value: f64,
    pub market_delta: f64,
    pub market_delta_pct: f64,
    pub concentration_by_asset: Vec<ConcentrationEntry>,
    pub concentration_by_type: Vec<ConcentrationEntry>,
    pub alerts: Vec<String>,
    pub latest_quote_date: Option<NaiveDate>,
    pub top_gainers: Vec<Mover>,
    pub top_losers: Vec<Mover>,
    pub rows: Vec<DashboardRow>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRow {
    pub asset_id: String,
    pub ticker: String,
    #[serde(rename = "type")]
    pub asset_type: Option<AssetType>,
    pub invested: f64,
    pub valuation: Option<Valuation>,
    pub quote: Option<MarketQuote>,
    pub fundamentals: Option<Fundamentals>,
    pub dy_monthly: f64,
    pub dy_12m: f64,
    pub income_score: Option<u8>,
    pub stability_score: Option<u8>,
    pub risk_score: Option<u8>,
    pub composite_score: Option<u8>,
    pub signal: Signal,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub filter: AnalysisFilter,
    pub latest_quote_date: Option<NaiveDate>,
    pub rows: Vec<AnalysisRow>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketRow {
    #[serde(flatten)]
    pub entry: CatalogAsset,
    pub quote: Option<CatalogQuote>,
    pub position_52w: Option<f64>,
}

/// Row filter for the analysis screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisFilter {
    #[default]
    All,
    Opportunity,
    Risk,
    Income,
    Stable,
    Vacancy,
    NoData,
}

impl AnalysisFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisFilter::All => "all",
            AnalysisFilter::Opportunity => "opportunity",
            AnalysisFilter::Risk => "risk",
            AnalysisFilter::Income => "income",
            AnalysisFilter::Stable => "stable",
            AnalysisFilter::Vacancy => "vacancy",
            AnalysisFilter::NoData => "no_data",
        }
    }
}

impl fmt::Display for AnalysisFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" | "todos" => Ok(AnalysisFilter::All),
            "opportunity" | "oportunidade" => Ok(AnalysisFilter::Opportunity),
            "risk" | "risco" => Ok(AnalysisFilter::Risk),
            "income" | "renda" => Ok(AnalysisFilter::Income),
            "stable" | "estavel" => Ok(AnalysisFilter::Stable),
            "vacancy" | "vacancia" => Ok(AnalysisFilter::Vacancy),
            "no_data" | "sem_dados" => Ok(AnalysisFilter::NoData),
            other => Err(Error::invalid(format!("Unknown analysis filter '{}'", other))),
        }
    }
}
