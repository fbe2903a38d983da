//! Asset and catalog domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Fund classification.
///
/// Accepts the English names as well as the Portuguese labels used by the
/// community (`tijolo`, `papel`, `hibrido`, `outros`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    /// Owns physical properties ("tijolo")
    Brick,
    /// Holds real-estate receivables ("papel")
    Paper,
    Hybrid,
    #[default]
    Other,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Brick => "brick",
            AssetType::Paper => "paper",
            AssetType::Hybrid => "hybrid",
            AssetType::Other => "other",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "brick" | "tijolo" => Ok(AssetType::Brick),
            "paper" | "papel" => Ok(AssetType::Paper),
            "hybrid" | "hibrido" | "híbrido" => Ok(AssetType::Hybrid),
            "other" | "outros" | "outro" => Ok(AssetType::Other),
            other => Err(Error::invalid(format!("Unknown asset type '{}'", other))),
        }
    }
}

/// Manual health flag set by the investor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    #[default]
    Ok,
    Attention,
    Problem,
}

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Ok => "ok",
            AssetStatus::Attention => "attention",
            AssetStatus::Problem => "problem",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ok" => Ok(AssetStatus::Ok),
            "attention" | "atencao" | "atenção" => Ok(AssetStatus::Attention),
            "problem" | "problema" => Ok(AssetStatus::Problem),
            other => Err(Error::invalid(format!("Unknown asset status '{}'", other))),
        }
    }
}

/// Trim and upper-case a ticker.
pub fn normalize_ticker(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}

/// Domain model representing a held fund
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub user_id: String,
    pub ticker: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub asset_type: Option<AssetType>,
    pub sector: Option<String>,
    pub notes: Option<String>,
    pub status: Option<AssetStatus>,
    pub created_at: NaiveDateTime,
}

impl Asset {
    /// Type bucket used for concentration: unset falls back to `Other`.
    pub fn type_or_default(&self) -> AssetType {
        self.asset_type.unwrap_or_default()
    }
}

/// Input model for creating or editing an asset.
///
/// With an `id` the existing record is updated; without one the asset is
/// upserted on `(user_id, ticker)`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: String,
    pub ticker: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub asset_type: Option<AssetType>,
    pub sector: Option<String>,
    pub notes: Option<String>,
    pub status: Option<AssetStatus>,
}

impl NewAsset {
    /// Validates the input and normalises the ticker in place.
    pub fn validate(&mut self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }
        self.ticker = normalize_ticker(&self.ticker);
        if self.ticker.is_empty() {
            return Err(ValidationError::MissingField("ticker".to_string()).into());
        }
        self.name = non_blank(self.name.take());
        self.sector = non_blank(self.sector.take());
        self.notes = non_blank(self.notes.take());
        Ok(())
    }
}

/// A ticker tracked on the user's reference list, held or not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogAsset {
    pub id: String,
    pub user_id: String,
    pub ticker: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub asset_type: Option<AssetType>,
    pub sector: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Input model for a catalog entry, upserted on `(user_id, ticker)`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewCatalogAsset {
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: String,
    pub ticker: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub asset_type: Option<AssetType>,
    pub sector: Option<String>,
}

impl NewCatalogAsset {
    pub fn validate(&mut self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }
        self.ticker = normalize_ticker(&self.ticker);
        if self.ticker.is_empty() {
            return Err(ValidationError::MissingField("ticker".to_string()).into());
        }
        self.name = non_blank(self.name.take());
        self.sector = non_blank(self.sector.take());
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
