//! Database models for fundamentals.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fiifolio_core::fundamentals::{Fundamentals, NewFundamentals};

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::fundamentals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct FundamentalsDB {
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

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::fundamentals)]
#[diesel(treat_none_as_null = true)]
pub struct FundamentalsChangesetDB {
    pub vacancy_physical: Option<f64>,
    pub vacancy_financial: Option<f64>,
    pub wault_years: Option<f64>,
    pub debt_ratio: Option<f64>,
    pub liquidity_daily: Option<f64>,
    pub notes: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl From<FundamentalsDB> for Fundamentals {
    fn from(db: FundamentalsDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            asset_id: db.asset_id,
            vacancy_physical: db.vacancy_physical,
            vacancy_financial: db.vacancy_financial,
            wault_years: db.wault_years,
            debt_ratio: db.debt_ratio,
            liquidity_daily: db.liquidity_daily,
            notes: db.notes,
            updated_at: db.updated_at,
        }
    }
}

impl FundamentalsChangesetDB {
    pub fn new(domain: &NewFundamentals, updated_at: NaiveDateTime) -> Self {
        Self {
            vacancy_physical: domain.vacancy_physical,
            vacancy_financial: domain.vacancy_financial,
            wault_years: domain.wault_years,
            debt_ratio: domain.debt_ratio,
            liquidity_daily: domain.liquidity_daily,
            notes: domain.notes.clone(),
            updated_at,
        }
    }
}
