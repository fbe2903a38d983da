//! Database models for valuations.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fiifolio_core::valuations::{NewValuation, Valuation};

use crate::utils::{new_id, now_utc};

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
#[diesel(table_name = crate::schema::valuations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ValuationDB {
    pub id: String,
    pub user_id: String,
    pub asset_id: String,
    pub date: Option<NaiveDate>,
    pub price: Option<f64>,
    pub book_value_per_share: Option<f64>,
    pub price_to_book: Option<f64>,
    pub source: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<ValuationDB> for Valuation {
    fn from(db: ValuationDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            asset_id: db.asset_id,
            date: db.date,
            price: db.price,
            book_value_per_share: db.book_value_per_share,
            price_to_book: db.price_to_book,
            source: db.source,
            created_at: db.created_at,
        }
    }
}

/// New rows get a fresh id and the current time.
impl From<NewValuation> for ValuationDB {
    fn from(domain: NewValuation) -> Self {
        Self {
            id: new_id(),
            user_id: domain.user_id,
            asset_id: domain.asset_id,
            date: domain.date,
            price: domain.price,
            book_value_per_share: domain.book_value_per_share,
            price_to_book: domain.price_to_book,
            source: domain.source,
            created_at: now_utc(),
        }
    }
}
