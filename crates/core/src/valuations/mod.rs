//! Valuations module - manual and fetched price/book snapshots.

mod valuations_model;
mod valuations_service;
mod valuations_traits;

pub use valuations_model::{resolve_price_to_book, NewValuation, Valuation};
pub use valuations_service::ValuationService;
pub use valuations_traits::{ValuationRepositoryTrait, ValuationServiceTrait};
