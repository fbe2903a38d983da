//! SQLite storage implementation for held-asset and catalog quotes.

mod model;
mod repository;

pub use model::{
    CatalogQuoteChangesetDB, CatalogQuoteDB, MarketQuoteChangesetDB, MarketQuoteDB,
};
pub use repository::{CatalogQuoteRepository, MarketQuoteRepository};
