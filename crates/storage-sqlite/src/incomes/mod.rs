//! SQLite storage implementation for monthly incomes.

mod model;
mod repository;

pub use model::{IncomeChangesetDB, IncomeDB};
pub use repository::IncomeRepository;
