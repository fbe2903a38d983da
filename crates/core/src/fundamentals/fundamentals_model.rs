use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Fund fundamentals entered by the investor. One per `(user_id, asset_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Fundamentals {
    pub id: String,
    pub user_id: String,
    pub asset_id: String,
    pub vacancy_physical: Option<f64>,
    pub vacancy_financial: Option<f64>,
    pub wault_years: Option<f64>,
    pub debt_ratio: Option<f64>,
    pub liquidity_daily: Option<f64>,
    pub notes: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl Fundamentals {
    /// Financial vacancy when known, else physical vacancy.
    pub fn vacancy(&self) -> Option<f64> {
        self.vacancy_financial.or(self.vacancy_physical)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewFundamentals {
    #[serde(default)]
    pub user_id: String,
    pub asset_id: String,
    pub vacancy_physical: Option<f64>,
    pub vacancy_financial: Option<f64>,
    pub wault_years: Option<f64>,
    pub debt_ratio: Option<f64>,
    pub liquidity_daily: Option<f64>,
    pub notes: Option<String>,
}

impl NewFundamentals {
    pub fn validate(&self) -> Result<()> {
        if self.asset_id.trim().is_empty() {
            return Err(ValidationError::MissingField("assetId".to_string()).into());
        }
        let numbers = [
            self.vacancy_physical,
            self.vacancy_financial,
            self.wault_years,
            self.debt_ratio,
            self.liquidity_daily,
        ];
        if numbers.iter().flatten().any(|v| !v.is_finite()) {
            return Err(ValidationError::InvalidInput(
                "fundamentals must be finite numbers".to_string(),
            )
            .into());
        }
        Ok(())
    }
}
