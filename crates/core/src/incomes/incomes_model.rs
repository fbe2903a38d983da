use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::utils::MonthKey;

/// Distribution received from an asset in a calendar month.
///
/// At most one per `(user_id, asset_id, month)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: String,
    pub user_id: String,
    pub asset_id: String,
    pub month: MonthKey,
    pub amount: Option<f64>,
    pub amount_per_share: Option<f64>,
    pub created_at: NaiveDateTime,
}

impl Income {
    /// Amount used by aggregation. Absent or non-finite amounts count as zero.
    pub fn effective_amount(&self) -> f64 {
        self.amount.filter(|a| a.is_finite()).unwrap_or(0.0)
    }
}

/// Input model for saving an income, upserted on `(user_id, asset_id, month)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIncome {
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: String,
    pub asset_id: String,
    pub month: MonthKey,
    pub amount: Option<f64>,
    pub amount_per_share: Option<f64>,
}

impl NewIncome {
    pub fn validate(&self) -> Result<()> {
        if self.asset_id.trim().is_empty() {
            return Err(ValidationError::MissingField("assetId".to_string()).into());
        }
        for (field, value) in [
            ("amount", self.amount),
            ("amountPerShare", self.amount_per_share),
        ] {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(
                    ValidationError::InvalidInput(format!("{} must be a number", field)).into(),
                );
            }
        }
        Ok(())
    }

    /// Whether the total should be derived from the per-share value.
    pub fn needs_derived_amount(&self) -> bool {
        let amount_missing = self.amount.map_or(true, |a| a == 0.0);
        amount_missing && self.amount_per_share.is_some_and(|aps| aps != 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_income(amount: Option<f64>, amount_per_share: Option<f64>) -> NewIncome {
        NewIncome {
            id: None,
            user_id: "u1".to_string(),
            asset_id: "a1".to_string(),
            month: "2024-05".parse().unwrap(),
            amount,
            amount_per_share,
        }
    }

    #[test]
    fn test_needs_derived_amount() {
        assert!(new_income(None, Some(0.8)).needs_derived_amount());
        assert!(new_income(Some(0.0), Some(0.8)).needs_derived_amount());
        assert!(!new_income(Some(80.0), Some(0.8)).needs_derived_amount());
        assert!(!new_income(None, None).needs_derived_amount());
    }

    #[test]
    fn test_effective_amount_defaults_to_zero() {
        let income = Income {
            id: "i1".to_string(),
            user_id: "u1".to_string(),
            asset_id: "a1".to_string(),
            month: "2024-05".parse().unwrap(),
            amount: None,
            amount_per_share: Some(1.0),
            created_at: NaiveDateTime::default(),
        };
        assert_eq!(income.effective_amount(), 0.0);
        assert_eq!(
            Income {
                amount: Some(f64::NAN),
                ..income.clone()
            }
            .effective_amount(),
            0.0
        );
        assert_eq!(
            Income {
                amount: Some(42.0),
                ..income
            }
            .effective_amount(),
            42.0
        );
    }

    #[test]
    fn test_validate_rejects_nan() {
        assert!(new_income(Some(f64::NAN), None).validate().is_err());
        assert!(new_income(Some(10.0), None).validate().is_ok());
    }
}
