//! Fiifolio Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for tracking real-estate fund
//! holdings: records and their services, the derivation engine that turns
//! them into scores and alerts, and quote reconciliation. It is
//! database-agnostic and defines traits that are implemented by the
//! `storage-sqlite` crate.

pub mod analytics;
pub mod assets;
pub mod constants;
pub mod errors;
pub mod fundamentals;
pub mod incomes;
pub mod insights;
pub mod positions;
pub mod quotes;
pub mod settings;
pub mod transfer;
pub mod utils;
pub mod valuations;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export common types from the asset module
pub use assets::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
