//! Quote storage traits.

use async_trait::async_trait;

use super::model::{CatalogQuote, MarketQuote, NewCatalogQuote, NewMarketQuote};
use crate::errors::Result;

/// Storage interface for held-asset quotes.
#[async_trait]
pub trait MarketQuoteRepositoryTrait: Send + Sync {
    fn list(&self, user_id: &str) -> Result<Vec<MarketQuote>>;

    /// Upserts every row on `(user_id, asset_id, date)` in one write.
    /// Same-day rows are overwritten. Returns rows written.
    async fn upsert_many(&self, quotes: Vec<NewMarketQuote>) -> Result<usize>;
}

/// Storage interface for catalog quotes.
#[async_trait]
pub trait CatalogQuoteRepositoryTrait: Send + Sync {
    fn list(&self, user_id: &str) -> Result<Vec<CatalogQuote>>;

    /// Upserts every row on `(user_id, catalog_id, date)` in one write.
    async fn upsert_many(&self, quotes: Vec<NewCatalogQuote>) -> Result<usize>;
}
