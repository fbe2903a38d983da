use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use fiifolio_core::errors::Result;
use fiifolio_core::fundamentals::{Fundamentals, FundamentalsRepositoryTrait, NewFundamentals};

use super::model::{FundamentalsChangesetDB, FundamentalsDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::fundamentals;
use crate::utils::{new_id, now_utc};

pub struct FundamentalsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl FundamentalsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl FundamentalsRepositoryTrait for FundamentalsRepository {
    async fn upsert(&self, new_fundamentals: NewFundamentals) -> Result<Fundamentals> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Fundamentals> {
                let changes = FundamentalsChangesetDB::new(&new_fundamentals, now_utc());
                let row = FundamentalsDB {
                    id: new_id(),
                    user_id: new_fundamentals.user_id.clone(),
                    asset_id: new_fundamentals.asset_id.clone(),
                    vacancy_physical: changes.vacancy_physical,
                    vacancy_financial: changes.vacancy_financial,
                    wault_years: changes.wault_years,
                    debt_ratio: changes.debt_ratio,
                    liquidity_daily: changes.liquidity_daily,
                    notes: changes.notes.clone(),
                    updated_at: changes.updated_at,
                };
                diesel::insert_into(fundamentals::table)
                    .values(&row)
                    .on_conflict((fundamentals::user_id, fundamentals::asset_id))
                    .do_update()
                    .set(&changes)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let stored = fundamentals::table
                    .filter(fundamentals::user_id.eq(&new_fundamentals.user_id))
                    .filter(fundamentals::asset_id.eq(&new_fundamentals.asset_id))
                    .select(FundamentalsDB::as_select())
                    .first::<FundamentalsDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(stored.into())
            })
            .await
    }

    fn list(&self, user_id: &str) -> Result<Vec<Fundamentals>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = fundamentals::table
            .filter(fundamentals::user_id.eq(user_id))
            .select(FundamentalsDB::as_select())
            .load::<FundamentalsDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Fundamentals::from).collect())
    }
}
