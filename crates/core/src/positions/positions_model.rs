use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Holding of a single asset. At most one per `(user_id, asset_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: String,
    pub user_id: String,
    pub asset_id: String,
    pub quantity: f64,
    pub avg_price: f64,
    pub costs: f64,
    pub start_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

impl Position {
    /// `quantity × avg_price + costs`
    pub fn invested_value(&self) -> f64 {
        self.quantity * self.avg_price + self.costs
    }
}

/// Input model for saving a position, upserted on `(user_id, asset_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewPosition {
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: String,
    pub asset_id: String,
    pub quantity: f64,
    pub avg_price: f64,
    #[serde(default)]
    pub costs: Option<f64>,
    pub start_date: Option<NaiveDate>,
}

impl NewPosition {
    pub fn validate(&self) -> Result<()> {
        if self.asset_id.trim().is_empty() {
            return Err(ValidationError::MissingField("assetId".to_string()).into());
        }
        for (field, value) in [
            ("quantity", Some(self.quantity)),
            ("avgPrice", Some(self.avg_price)),
            ("costs", self.costs),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(ValidationError::InvalidInput(format!(
                        "{} must be a non-negative number",
                        field
                    ))
                    .into());
                }
            }
        }
        Ok(())
    }
}
