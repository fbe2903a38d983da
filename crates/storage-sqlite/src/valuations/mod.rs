//! SQLite storage implementation for valuation snapshots.

mod model;
mod repository;

pub use model::ValuationDB;
pub use repository::ValuationRepository;
