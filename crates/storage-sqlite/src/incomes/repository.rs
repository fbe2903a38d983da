use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use fiifolio_core::errors::Result;
use fiifolio_core::incomes::{Income, IncomeRepositoryTrait, NewIncome};

use super::model::{IncomeChangesetDB, IncomeDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::incomes;
use crate::utils::{new_id, now_utc};

pub struct IncomeRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl IncomeRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl IncomeRepositoryTrait for IncomeRepository {
    async fn upsert(&self, new_income: NewIncome) -> Result<Income> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Income> {
                let month = new_income.month.to_string();
                let changes = IncomeChangesetDB::from(&new_income);
                let row = IncomeDB {
                    id: new_income.id.clone().unwrap_or_else(new_id),
                    user_id: new_income.user_id.clone(),
                    asset_id: new_income.asset_id.clone(),
                    month: month.clone(),
                    amount: changes.amount,
                    amount_per_share: changes.amount_per_share,
                    created_at: now_utc(),
                };
                diesel::insert_into(incomes::table)
                    .values(&row)
                    .on_conflict((incomes::user_id, incomes::asset_id, incomes::month))
                    .do_update()
                    .set(&changes)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let stored = incomes::table
                    .filter(incomes::user_id.eq(&new_income.user_id))
                    .filter(incomes::asset_id.eq(&new_income.asset_id))
                    .filter(incomes::month.eq(&month))
                    .select(IncomeDB::as_select())
                    .first::<IncomeDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Income::try_from(stored)?)
            })
            .await
    }

    fn list(&self, user_id: &str) -> Result<Vec<Income>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = incomes::table
            .filter(incomes::user_id.eq(user_id))
            .order((incomes::month.asc(), incomes::asset_id.asc()))
            .select(IncomeDB::as_select())
            .load::<IncomeDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter()
            .map(|row| Income::try_from(row).map_err(Into::into))
            .collect()
    }

    async fn delete(&self, user_id: &str, income_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let income_id = income_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    incomes::table
                        .filter(incomes::id.eq(income_id))
                        .filter(incomes::user_id.eq(user_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
