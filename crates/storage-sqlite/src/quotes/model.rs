//! Database models for daily quote snapshots.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fiifolio_core::quotes::{CatalogQuote, MarketQuote, NewCatalogQuote, NewMarketQuote};

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
#[diesel(table_name = crate::schema::market_quotes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct MarketQuoteDB {
    pub id: String,
    pub user_id: String,
    pub asset_id: String,
    pub date: NaiveDate,
    pub price: Option<f64>,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
    pub volume: Option<f64>,
    pub week_52_high: Option<f64>,
    pub week_52_low: Option<f64>,
    pub source: Option<String>,
    pub created_at: NaiveDateTime,
}

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
#[diesel(table_name = crate::schema::market_catalog_quotes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuoteDB {
    pub id: String,
    pub user_id: String,
    pub catalog_id: String,
    pub date: NaiveDate,
    pub price: Option<f64>,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
    pub volume: Option<f64>,
    pub week_52_high: Option<f64>,
    pub week_52_low: Option<f64>,
    pub source: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Columns replaced when a quote for the same day is written again.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::market_quotes)]
#[diesel(treat_none_as_null = true)]
pub struct MarketQuoteChangesetDB {
    pub price: Option<f64>,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
    pub volume: Option<f64>,
    pub week_52_high: Option<f64>,
    pub week_52_low: Option<f64>,
    pub source: Option<String>,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::market_catalog_quotes)]
#[diesel(treat_none_as_null = true)]
pub struct CatalogQuoteChangesetDB {
    pub price: Option<f64>,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
    pub volume: Option<f64>,
    pub week_52_high: Option<f64>,
    pub week_52_low: Option<f64>,
    pub source: Option<String>,
}

impl From<MarketQuoteDB> for MarketQuote {
    fn from(db: MarketQuoteDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            asset_id: db.asset_id,
            date: db.date,
            price: db.price,
            change: db.change,
            change_percent: db.change_percent,
            volume: db.volume,
            week_52_high: db.week_52_high,
            week_52_low: db.week_52_low,
            source: db.source,
            created_at: db.created_at,
        }
    }
}

impl From<CatalogQuoteDB> for CatalogQuote {
    fn from(db: CatalogQuoteDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            catalog_id: db.catalog_id,
            date: db.date,
            price: db.price,
            change: db.change,
            change_percent: db.change_percent,
            volume: db.volume,
            week_52_high: db.week_52_high,
            week_52_low: db.week_52_low,
            source: db.source,
            created_at: db.created_at,
        }
    }
}

impl From<&NewMarketQuote> for MarketQuoteDB {
    fn from(domain: &NewMarketQuote) -> Self {
        Self {
            id: new_id(),
            user_id: domain.user_id.clone(),
            asset_id: domain.asset_id.clone(),
            date: domain.date,
            price: domain.price,
            change: domain.change,
            change_percent: domain.change_percent,
            volume: domain.volume,
            week_52_high: domain.week_52_high,
            week_52_low: domain.week_52_low,
            source: domain.source.clone(),
            created_at: now_utc(),
        }
    }
}

impl From<&NewCatalogQuote> for CatalogQuoteDB {
    fn from(domain: &NewCatalogQuote) -> Self {
        Self {
            id: new_id(),
            user_id: domain.user_id.clone(),
            catalog_id: domain.catalog_id.clone(),
            date: domain.date,
            price: domain.price,
            change: domain.change,
            change_percent: domain.change_percent,
            volume: domain.volume,
            week_52_high: domain.week_52_high,
            week_52_low: domain.week_52_low,
            source: domain.source.clone(),
            created_at: now_utc(),
        }
    }
}

impl From<&MarketQuoteDB> for MarketQuoteChangesetDB {
    fn from(row: &MarketQuoteDB) -> Self {
        Self {
            price: row.price,
            change: row.change,
            change_percent: row.change_percent,
            volume: row.volume,
            week_52_high: row.week_52_high,
            week_52_low: row.week_52_low,
            source: row.source.clone(),
        }
    }
}

impl From<&CatalogQuoteDB> for CatalogQuoteChangesetDB {
    fn from(row: &CatalogQuoteDB) -> Self {
        Self {
            price: row.price,
            change: row.change,
            change_percent: row.change_percent,
            volume: row.volume,
            week_52_high: row.week_52_high,
            week_52_low: row.week_52_low,
            source: row.source.clone(),
        }
    }
}
