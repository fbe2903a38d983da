use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use fiifolio_core::errors::Result;
use fiifolio_core::quotes::{
    CatalogQuote, CatalogQuoteRepositoryTrait, MarketQuote, MarketQuoteRepositoryTrait,
    NewCatalogQuote, NewMarketQuote,
};

use super::model::{CatalogQuoteChangesetDB, CatalogQuoteDB, MarketQuoteDB, MarketQuoteChangesetDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{market_catalog_quotes, market_quotes};

/// Quotes for held assets, one row per `(user_id, asset_id, date)`.
pub struct MarketQuoteRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl MarketQuoteRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl MarketQuoteRepositoryTrait for MarketQuoteRepository {
    fn list(&self, user_id: &str) -> Result<Vec<MarketQuote>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = market_quotes::table
            .filter(market_quotes::user_id.eq(user_id))
            .order((market_quotes::date.desc(), market_quotes::created_at.desc()))
            .select(MarketQuoteDB::as_select())
            .load::<MarketQuoteDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(MarketQuote::from).collect())
    }

    async fn upsert_many(&self, quotes: Vec<NewMarketQuote>) -> Result<usize> {
        if quotes.is_empty() {
            return Ok(0);
        }
        let rows: Vec<MarketQuoteDB> = quotes.iter().map(MarketQuoteDB::from).collect();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut written = 0;
                for row in &rows {
                    written += diesel::insert_into(market_quotes::table)
                        .values(row)
                        .on_conflict((
                            market_quotes::user_id,
                            market_quotes::asset_id,
                            market_quotes::date,
                        ))
                        .do_update()
                        .set(&MarketQuoteChangesetDB::from(row))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(written)
            })
            .await
    }
}

/// Quotes for catalog entries, one row per `(user_id, catalog_id, date)`.
pub struct CatalogQuoteRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CatalogQuoteRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl CatalogQuoteRepositoryTrait for CatalogQuoteRepository {
    fn list(&self, user_id: &str) -> Result<Vec<CatalogQuote>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = market_catalog_quotes::table
            .filter(market_catalog_quotes::user_id.eq(user_id))
            .order((
                market_catalog_quotes::date.desc(),
                market_catalog_quotes::created_at.desc(),
            ))
            .select(CatalogQuoteDB::as_select())
            .load::<CatalogQuoteDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(CatalogQuote::from).collect())
    }

    async fn upsert_many(&self, quotes: Vec<NewCatalogQuote>) -> Result<usize> {
        if quotes.is_empty() {
            return Ok(0);
        }
        let rows: Vec<CatalogQuoteDB> = quotes.iter().map(CatalogQuoteDB::from).collect();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut written = 0;
                for row in &rows {
                    written += diesel::insert_into(market_catalog_quotes::table)
                        .values(row)
                        .on_conflict((
                            market_catalog_quotes::user_id,
                            market_catalog_quotes::catalog_id,
                            market_catalog_quotes::date,
                        ))
                        .do_update()
                        .set(&CatalogQuoteChangesetDB::from(row))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(written)
            })
            .await
    }
}
