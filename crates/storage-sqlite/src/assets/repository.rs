use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use fiifolio_core::assets::{Asset, AssetRepositoryTrait, NewAsset};
use fiifolio_core::errors::{Error, Result};

use super::model::{AssetChangesetDB, AssetDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::assets;
use crate::utils::{new_id, now_utc};

pub struct AssetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AssetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load_asset(conn: &mut SqliteConnection, asset_id: &str) -> Result<Asset> {
    let row = assets::table
        .find(asset_id)
        .select(AssetDB::as_select())
        .first::<AssetDB>(conn)
        .map_err(StorageError::from)?;
    Ok(row.into())
}

#[async_trait]
impl AssetRepositoryTrait for AssetRepository {
    async fn upsert(&self, new_asset: NewAsset) -> Result<Asset> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Asset> {
                let changes = AssetChangesetDB::from(&new_asset);

                let asset_id = match new_asset.id {
                    Some(existing_id) => {
                        let updated = diesel::update(
                            assets::table
                                .filter(assets::id.eq(&existing_id))
                                .filter(assets::user_id.eq(&new_asset.user_id)),
                        )
                        .set(&changes)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                        if updated == 0 {
                            return Err(Error::NotFound(format!("Asset {}", existing_id)));
                        }
                        existing_id
                    }
                    None => {
                        let row = AssetDB {
                            id: new_id(),
                            user_id: new_asset.user_id.clone(),
                            ticker: changes.ticker.clone(),
                            name: changes.name.clone(),
                            asset_type: changes.asset_type.clone(),
                            sector: changes.sector.clone(),
                            notes: changes.notes.clone(),
                            status: changes.status.clone(),
                            created_at: now_utc(),
                        };
                        diesel::insert_into(assets::table)
                            .values(&row)
                            .on_conflict((assets::user_id, assets::ticker))
                            .do_update()
                            .set(&changes)
                            .execute(conn)
                            .map_err(StorageError::from)?;
                        assets::table
                            .filter(assets::user_id.eq(&new_asset.user_id))
                            .filter(assets::ticker.eq(&changes.ticker))
                            .select(assets::id)
                            .first::<String>(conn)
                            .map_err(StorageError::from)?
                    }
                };

                load_asset(conn, &asset_id)
            })
            .await
    }

    fn get_by_id(&self, user_id: &str, asset_id: &str) -> Result<Asset> {
        let mut conn = get_connection(&self.pool)?;
        assets::table
            .filter(assets::id.eq(asset_id))
            .filter(assets::user_id.eq(user_id))
            .select(AssetDB::as_select())
            .first::<AssetDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Asset::from)
            .ok_or_else(|| Error::NotFound(format!("Asset {}", asset_id)))
    }

    fn list(&self, user_id: &str) -> Result<Vec<Asset>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = assets::table
            .filter(assets::user_id.eq(user_id))
            .order(assets::ticker.asc())
            .select(AssetDB::as_select())
            .load::<AssetDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Asset::from).collect())
    }

    fn list_all(&self) -> Result<Vec<Asset>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = assets::table
            .order((assets::user_id.asc(), assets::ticker.asc()))
            .select(AssetDB::as_select())
            .load::<AssetDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Asset::from).collect())
    }

    async fn delete(&self, user_id: &str, asset_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let asset_id = asset_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    assets::table
                        .filter(assets::id.eq(asset_id))
                        .filter(assets::user_id.eq(user_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
