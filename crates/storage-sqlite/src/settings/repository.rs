use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use fiifolio_core::errors::Result;
use fiifolio_core::settings::{Settings, SettingsRepositoryTrait};

use super::model::SettingsDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::settings;

pub struct SettingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SettingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    fn get_settings(&self, user_id: &str) -> Result<Option<Settings>> {
        let mut conn = get_connection(&self.pool)?;
        let row = settings::table
            .find(user_id)
            .select(SettingsDB::as_select())
            .first::<SettingsDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Settings::from))
    }

    async fn save_settings(&self, new_settings: &Settings) -> Result<Settings> {
        let row = SettingsDB::from(new_settings);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Settings> {
                diesel::insert_into(settings::table)
                    .values(&row)
                    .on_conflict(settings::user_id)
                    .do_update()
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(row.into())
            })
            .await
    }
}
