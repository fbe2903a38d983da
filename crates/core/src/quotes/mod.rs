//! Quote management module.
//!
//! - [`model`] - stored quote models and the reconciliation summary
//! - [`store`] - storage traits for held-asset and catalog quotes
//! - [`service`] - read access to stored quotes
//! - [`reconciliation`] - fetches provider quotes and merges them into storage

pub mod model;
pub mod reconciliation;
pub mod service;
pub mod store;


pub use model::{
    CatalogQuote, MarketQuote, NewCatalogQuote, NewMarketQuote, ReconciliationSummary,
};
pub use reconciliation::{
    resolve_quote_date, QuoteReconciliationService, QuoteReconciliationServiceTrait,
};
pub use service::{QuoteService, QuoteServiceTrait};
pub use store::{CatalogQuoteRepositoryTrait, MarketQuoteRepositoryTrait};
