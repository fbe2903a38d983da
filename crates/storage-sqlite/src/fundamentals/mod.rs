//! SQLite storage implementation for fund fundamentals.

mod model;
mod repository;

pub use model::{FundamentalsChangesetDB, FundamentalsDB};
pub use repository::FundamentalsRepository;
