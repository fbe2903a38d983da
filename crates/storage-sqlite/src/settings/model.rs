//! Database model for settings. Unset thresholds are stored as NULL and
//! resolved to defaults on read by the domain layer.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fiifolio_core::settings::Settings;

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::settings)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDB {
    pub user_id: String,
    pub goal_amount: Option<f64>,
    pub alert_max_asset_pct: Option<f64>,
    pub alert_income_drop_pct: Option<f64>,
    pub alert_vacancy_pct: Option<f64>,
    pub alert_asset_dy_drop_pct: Option<f64>,
}

impl From<SettingsDB> for Settings {
    fn from(db: SettingsDB) -> Self {
        Self {
            user_id: db.user_id,
            goal_amount: db.goal_amount,
            alert_max_asset_pct: db.alert_max_asset_pct,
            alert_income_drop_pct: db.alert_income_drop_pct,
            alert_vacancy_pct: db.alert_vacancy_pct,
            alert_asset_dy_drop_pct: db.alert_asset_dy_drop_pct,
        }
    }
}

impl From<&Settings> for SettingsDB {
    fn from(domain: &Settings) -> Self {
        Self {
            user_id: domain.user_id.clone(),
            goal_amount: domain.goal_amount,
            alert_max_asset_pct: domain.alert_max_asset_pct,
            alert_income_drop_pct: domain.alert_income_drop_pct,
            alert_vacancy_pct: domain.alert_vacancy_pct,
            alert_asset_dy_drop_pct: domain.alert_asset_dy_drop_pct,
        }
    }
}
