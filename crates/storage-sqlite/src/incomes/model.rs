//! Database models for incomes. Months are stored as `YYYY-MM` text.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fiifolio_core::incomes::{Income, NewIncome};

use crate::errors::StorageError;

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
#[diesel(table_name = crate::schema::incomes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct IncomeDB {
    pub id: String,
    pub user_id: String,
    pub asset_id: String,
    pub month: String,
    pub amount: Option<f64>,
    pub amount_per_share: Option<f64>,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::incomes)]
#[diesel(treat_none_as_null = true)]
pub struct IncomeChangesetDB {
    pub amount: Option<f64>,
    pub amount_per_share: Option<f64>,
}

impl TryFrom<IncomeDB> for Income {
    type Error = StorageError;

    fn try_from(db: IncomeDB) -> Result<Self, Self::Error> {
        let month = db.month.parse().map_err(|_| {
            StorageError::InvalidValue(format!("income {} has month '{}'", db.id, db.month))
        })?;
        Ok(Self {
            id: db.id,
            user_id: db.user_id,
            asset_id: db.asset_id,
            month,
            amount: db.amount,
            amount_per_share: db.amount_per_share,
            created_at: db.created_at,
        })
    }
}

impl From<&NewIncome> for IncomeChangesetDB {
    fn from(domain: &NewIncome) -> Self {
        Self {
            amount: domain.amount,
            amount_per_share: domain.amount_per_share,
        }
    }
}
