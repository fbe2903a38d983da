use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

pub const DEFAULT_GOAL_AMOUNT: f64 = 100_000.0;
pub const DEFAULT_ALERT_MAX_ASSET_PCT: f64 = 0.2;
pub const DEFAULT_ALERT_INCOME_DROP_PCT: f64 = 0.2;
pub const DEFAULT_ALERT_VACANCY_PCT: f64 = 0.15;
pub const DEFAULT_ALERT_ASSET_DY_DROP_PCT: f64 = 0.2;

/// Per-user settings as stored. Absent values resolve to defaults on read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub user_id: String,
    pub goal_amount: Option<f64>,
    pub alert_max_asset_pct: Option<f64>,
    pub alert_income_drop_pct: Option<f64>,
    pub alert_vacancy_pct: Option<f64>,
    pub alert_asset_dy_drop_pct: Option<f64>,
}

/// Partial settings update. `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub goal_amount: Option<f64>,
    pub alert_max_asset_pct: Option<f64>,
    pub alert_income_drop_pct: Option<f64>,
    pub alert_vacancy_pct: Option<f64>,
    pub alert_asset_dy_drop_pct: Option<f64>,
}

impl SettingsUpdate {
    pub fn validate(&self) -> Result<()> {
        let values = [
            self.goal_amount,
            self.alert_max_asset_pct,
            self.alert_income_drop_pct,
            self.alert_vacancy_pct,
            self.alert_asset_dy_drop_pct,
        ];
        if values.iter().flatten().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ValidationError::InvalidInput(
                "settings must be non-negative numbers".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

impl Settings {
    pub fn apply(&mut self, update: &SettingsUpdate) {
        fn merge(target: &mut Option<f64>, value: Option<f64>) {
            if value.is_some() {
                *target = value;
            }
        }
        merge(&mut self.goal_amount, update.goal_amount);
        merge(&mut self.alert_max_asset_pct, update.alert_max_asset_pct);
        merge(&mut self.alert_income_drop_pct, update.alert_income_drop_pct);
        merge(&mut self.alert_vacancy_pct, update.alert_vacancy_pct);
        merge(&mut self.alert_asset_dy_drop_pct, update.alert_asset_dy_drop_pct);
    }

    pub fn goal_amount(&self) -> f64 {
        self.goal_amount.unwrap_or(DEFAULT_GOAL_AMOUNT)
    }

    pub fn thresholds(&self) -> AlertThresholds {
        AlertThresholds {
            max_asset_pct: self
                .alert_max_asset_pct
                .unwrap_or(DEFAULT_ALERT_MAX_ASSET_PCT),
            income_drop_pct: self
                .alert_income_drop_pct
                .unwrap_or(DEFAULT_ALERT_INCOME_DROP_PCT),
            vacancy_pct: self.alert_vacancy_pct.unwrap_or(DEFAULT_ALERT_VACANCY_PCT),
            asset_dy_drop_pct: self
                .alert_asset_dy_drop_pct
                .unwrap_or(DEFAULT_ALERT_ASSET_DY_DROP_PCT),
        }
    }
}

/// Alert thresholds with defaults resolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertThresholds {
    pub max_asset_pct: f64,
    pub income_drop_pct: f64,
    pub vacancy_pct: f64,
    pub asset_dy_drop_pct: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Settings::default().thresholds()
    }
}
