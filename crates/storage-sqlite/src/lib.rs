//! SQLite storage implementation for Fiifolio.
//!
//! This crate is the only place in the workspace where Diesel appears. It
//! implements the repository traits defined in `fiifolio-core`:
//! - connection pooling and the single-writer actor
//! - embedded Diesel migrations
//! - one repository per stored entity
//! - database row types (with Diesel derives) and their domain conversions
//!
//! ```text
//! core (traits, services)
//!          │
//!          ▼
//!  storage-sqlite (this crate)
//!          │
//!          ▼
//!      SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod assets;
pub mod fundamentals;
pub mod incomes;
pub mod positions;
pub mod quotes;
pub mod settings;
pub mod valuations;

pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

pub use errors::{IntoCore, StorageError};

pub use fiifolio_core::errors::{DatabaseError, Error, Result};
