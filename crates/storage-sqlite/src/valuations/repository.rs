use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::collections::HashSet;
use std::sync::Arc;

use fiifolio_core::errors::Result;
use fiifolio_core::valuations::{NewValuation, Valuation, ValuationRepositoryTrait};

use super::model::ValuationDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::valuations;
use crate::utils::{chunk_for_sqlite, chunk_rows_for_insert};

const VALUATION_COLUMNS: usize = 9;

pub struct ValuationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ValuationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ValuationRepositoryTrait for ValuationRepository {
    async fn insert(&self, new_valuation: NewValuation) -> Result<Valuation> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Valuation> {
                let row = ValuationDB::from(new_valuation);
                diesel::insert_into(valuations::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(row.into())
            })
            .await
    }

    async fn insert_many(&self, new_valuations: Vec<NewValuation>) -> Result<usize> {
        if new_valuations.is_empty() {
            return Ok(0);
        }
        let rows: Vec<ValuationDB> = new_valuations.into_iter().map(ValuationDB::from).collect();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut inserted = 0;
                for chunk in chunk_rows_for_insert(&rows, VALUATION_COLUMNS) {
                    inserted += diesel::insert_into(valuations::table)
                        .values(chunk)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(inserted)
            })
            .await
    }

    fn list(&self, user_id: &str) -> Result<Vec<Valuation>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = valuations::table
            .filter(valuations::user_id.eq(user_id))
            .order((valuations::date.desc(), valuations::created_at.desc()))
            .select(ValuationDB::as_select())
            .load::<ValuationDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Valuation::from).collect())
    }

    fn find_existing(&self, keys: &[(String, NaiveDate)]) -> Result<Vec<(String, NaiveDate)>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let wanted: HashSet<&(String, NaiveDate)> = keys.iter().collect();
        let asset_ids: Vec<String> = keys
            .iter()
            .map(|(asset_id, _)| asset_id.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let mut conn = get_connection(&self.pool)?;
        let mut found = HashSet::new();
        for chunk in chunk_for_sqlite(&asset_ids) {
            let pairs = valuations::table
                .filter(valuations::asset_id.eq_any(chunk))
                .filter(valuations::date.is_not_null())
                .select((valuations::asset_id, valuations::date))
                .load::<(String, Option<NaiveDate>)>(&mut conn)
                .map_err(StorageError::from)?;
            found.extend(
                pairs
                    .into_iter()
                    .filter_map(|(asset_id, date)| Some((asset_id, date?)))
                    .filter(|pair| wanted.contains(pair)),
            );
        }
        Ok(found.into_iter().collect())
    }
}
