//! Request and response shapes that only exist at the HTTP boundary.

use chrono::NaiveDate;
use fiifolio_core::settings::{AlertThresholds, Settings};
use serde::{Deserialize, Serialize};

/// Stored settings alongside the values in effect after defaults.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    #[serde(flatten)]
    pub settings: Settings,
    pub effective_goal_amount: f64,
    pub thresholds: AlertThresholds,
}

impl From<Settings> for SettingsView {
    fn from(settings: Settings) -> Self {
        Self {
            effective_goal_amount: settings.goal_amount(),
            thresholds: settings.thresholds(),
            settings,
        }
    }
}

/// Optional reference date for calendar windows, `YYYY-MM-DD`.
#[derive(Debug, Default, Deserialize)]
pub struct ReferenceQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalysisQuery {
    pub filter: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSyncResponse {
    pub synced: usize,
}
