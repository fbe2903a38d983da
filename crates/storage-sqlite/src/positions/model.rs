//! Database models for positions.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fiifolio_core::positions::{NewPosition, Position};

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
#[diesel(table_name = crate::schema::positions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PositionDB {
    pub id: String,
    pub user_id: String,
    pub asset_id: String,
    pub quantity: f64,
    pub avg_price: f64,
    pub costs: f64,
    pub start_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::positions)]
#[diesel(treat_none_as_null = true)]
pub struct PositionChangesetDB {
    pub quantity: f64,
    pub avg_price: f64,
    pub costs: f64,
    pub start_date: Option<NaiveDate>,
}

impl From<PositionDB> for Position {
    fn from(db: PositionDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            asset_id: db.asset_id,
            quantity: db.quantity,
            avg_price: db.avg_price,
            costs: db.costs,
            start_date: db.start_date,
            created_at: db.created_at,
        }
    }
}

impl From<&NewPosition> for PositionChangesetDB {
    fn from(domain: &NewPosition) -> Self {
        Self {
            quantity: domain.quantity,
            avg_price: domain.avg_price,
            costs: domain.costs.unwrap_or(0.0),
            start_date: domain.start_date,
        }
    }
}
