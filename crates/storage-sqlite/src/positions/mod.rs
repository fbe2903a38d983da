//! SQLite storage implementation for positions.

mod model;
mod repository;

pub use model::{PositionChangesetDB, PositionDB};
pub use repository::PositionRepository;
