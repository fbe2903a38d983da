use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use fiifolio_core::assets::{AssetCatalogRepositoryTrait, CatalogAsset, NewCatalogAsset};
use fiifolio_core::errors::Result;

use super::model::{CatalogAssetChangesetDB, CatalogAssetDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::asset_catalog;
use crate::utils::{new_id, now_utc};

/// Repository for the per-user reference list of tickers.
pub struct AssetCatalogRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AssetCatalogRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl AssetCatalogRepositoryTrait for AssetCatalogRepository {
    async fn upsert(&self, entry: NewCatalogAsset) -> Result<CatalogAsset> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<CatalogAsset> {
                let changes = CatalogAssetChangesetDB::from(&entry);
                let row = CatalogAssetDB {
                    id: entry.id.clone().unwrap_or_else(new_id),
                    user_id: entry.user_id.clone(),
                    ticker: entry.ticker.clone(),
                    name: changes.name.clone(),
                    asset_type: changes.asset_type.clone(),
                    sector: changes.sector.clone(),
                    created_at: now_utc(),
                };
                diesel::insert_into(asset_catalog::table)
                    .values(&row)
                    .on_conflict((asset_catalog::user_id, asset_catalog::ticker))
                    .do_update()
                    .set(&changes)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let stored = asset_catalog::table
                    .filter(asset_catalog::user_id.eq(&entry.user_id))
                    .filter(asset_catalog::ticker.eq(&entry.ticker))
                    .select(CatalogAssetDB::as_select())
                    .first::<CatalogAssetDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(stored.into())
            })
            .await
    }

    fn list(&self, user_id: &str) -> Result<Vec<CatalogAsset>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = asset_catalog::table
            .filter(asset_catalog::user_id.eq(user_id))
            .order(asset_catalog::ticker.asc())
            .select(CatalogAssetDB::as_select())
            .load::<CatalogAssetDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(CatalogAsset::from).collect())
    }

    fn list_all(&self) -> Result<Vec<CatalogAsset>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = asset_catalog::table
            .order((asset_catalog::user_id.asc(), asset_catalog::ticker.asc()))
            .select(CatalogAssetDB::as_select())
            .load::<CatalogAssetDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(CatalogAsset::from).collect())
    }

    async fn delete(&self, user_id: &str, catalog_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let catalog_id = catalog_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    asset_catalog::table
                        .filter(asset_catalog::id.eq(catalog_id))
                        .filter(asset_catalog::user_id.eq(user_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
