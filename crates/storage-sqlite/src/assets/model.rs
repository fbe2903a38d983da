//! Database models for assets and catalog entries.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fiifolio_core::assets::{Asset, CatalogAsset, NewAsset, NewCatalogAsset};

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
#[diesel(table_name = crate::schema::assets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct AssetDB {
    pub id: String,
    pub user_id: String,
    pub ticker: String,
    pub name: Option<String>,
    pub asset_type: Option<String>,
    pub sector: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Editable asset columns. `None` clears the column.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::assets)]
#[diesel(treat_none_as_null = true)]
pub struct AssetChangesetDB {
    pub ticker: String,
    pub name: Option<String>,
    pub asset_type: Option<String>,
    pub sector: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
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
#[diesel(table_name = crate::schema::asset_catalog)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CatalogAssetDB {
    pub id: String,
    pub user_id: String,
    pub ticker: String,
    pub name: Option<String>,
    pub asset_type: Option<String>,
    pub sector: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::asset_catalog)]
#[diesel(treat_none_as_null = true)]
pub struct CatalogAssetChangesetDB {
    pub name: Option<String>,
    pub asset_type: Option<String>,
    pub sector: Option<String>,
}

// Unknown stored labels read back as unset rather than failing the row
impl From<AssetDB> for Asset {
    fn from(db: AssetDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            ticker: db.ticker,
            name: db.name,
            asset_type: db.asset_type.and_then(|t| t.parse().ok()),
            sector: db.sector,
            notes: db.notes,
            status: db.status.and_then(|s| s.parse().ok()),
            created_at: db.created_at,
        }
    }
}

impl From<&NewAsset> for AssetChangesetDB {
    fn from(domain: &NewAsset) -> Self {
        Self {
            ticker: domain.ticker.clone(),
            name: domain.name.clone(),
            asset_type: domain.asset_type.map(|t| t.as_str().to_string()),
            sector: domain.sector.clone(),
            notes: domain.notes.clone(),
            status: domain.status.map(|s| s.as_str().to_string()),
        }
    }
}

impl From<CatalogAssetDB> for CatalogAsset {
    fn from(db: CatalogAssetDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            ticker: db.ticker,
            name: db.name,
            asset_type: db.asset_type.and_then(|t| t.parse().ok()),
            sector: db.sector,
            created_at: db.created_at,
        }
    }
}

impl From<&NewCatalogAsset> for CatalogAssetChangesetDB {
    fn from(domain: &NewCatalogAsset) -> Self {
        Self {
            name: domain.name.clone(),
            asset_type: domain.asset_type.map(|t| t.as_str().to_string()),
            sector: domain.sector.clone(),
        }
    }
}
