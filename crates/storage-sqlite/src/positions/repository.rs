use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use fiifolio_core::errors::Result;
use fiifolio_core::positions::{NewPosition, Position, PositionRepositoryTrait};

use super::model::{PositionChangesetDB, PositionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::positions;
use crate::utils::{new_id, now_utc};

pub struct PositionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PositionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl PositionRepositoryTrait for PositionRepository {
    async fn upsert(&self, new_position: NewPosition) -> Result<Position> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Position> {
                let changes = PositionChangesetDB::from(&new_position);
                let row = PositionDB {
                    id: new_position.id.clone().unwrap_or_else(new_id),
                    user_id: new_position.user_id.clone(),
                    asset_id: new_position.asset_id.clone(),
                    quantity: changes.quantity,
                    avg_price: changes.avg_price,
                    costs: changes.costs,
                    start_date: changes.start_date,
                    created_at: now_utc(),
                };
                diesel::insert_into(positions::table)
                    .values(&row)
                    .on_conflict((positions::user_id, positions::asset_id))
                    .do_update()
                    .set(&changes)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let stored = positions::table
                    .filter(positions::user_id.eq(&new_position.user_id))
                    .filter(positions::asset_id.eq(&new_position.asset_id))
                    .select(PositionDB::as_select())
                    .first::<PositionDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(stored.into())
            })
            .await
    }

    fn list(&self, user_id: &str) -> Result<Vec<Position>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = positions::table
            .filter(positions::user_id.eq(user_id))
            .select(PositionDB::as_select())
            .load::<PositionDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Position::from).collect())
    }

    fn get_by_asset(&self, user_id: &str, asset_id: &str) -> Result<Option<Position>> {
        let mut conn = get_connection(&self.pool)?;
        let row = positions::table
            .filter(positions::user_id.eq(user_id))
            .filter(positions::asset_id.eq(asset_id))
            .select(PositionDB::as_select())
            .first::<PositionDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Position::from))
    }
}
