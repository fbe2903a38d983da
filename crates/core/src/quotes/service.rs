use std::sync::Arc;

use super::model::{CatalogQuote, MarketQuote};
use super::store::{CatalogQuoteRepositoryTrait, MarketQuoteRepositoryTrait};
use crate::errors::Result;

/// Read access to stored quotes.
pub trait QuoteServiceTrait: Send + Sync {
    fn get_quotes(&self, user_id: &str) -> Result<Vec<MarketQuote>>;
    fn get_catalog_quotes(&self, user_id: &str) -> Result<Vec<CatalogQuote>>;
}

pub struct QuoteService {
    market_quotes: Arc<dyn MarketQuoteRepositoryTrait>,
    catalog_quotes: Arc<dyn CatalogQuoteRepositoryTrait>,
}

impl QuoteService {
    pub fn new(
        market_quotes: Arc<dyn MarketQuoteRepositoryTrait>,
        catalog_quotes: Arc<dyn CatalogQuoteRepositoryTrait>,
    ) -> Self {
        Self {
            market_quotes,
            catalog_quotes,
        }
    }
}

impl QuoteServiceTrait for QuoteService {
    fn get_quotes(&self, user_id: &str) -> Result<Vec<MarketQuote>> {
        self.market_quotes.list(user_id)
    }

    fn get_catalog_quotes(&self, user_id: &str) -> Result<Vec<CatalogQuote>> {
        self.catalog_quotes.list(user_id)
    }
}
