//! Fiifolio Market Data Crate
//!
//! Provider-agnostic quote fetching for listed real-estate funds.
//!
//! # Overview
//!
//! A provider answers one question: "what is the latest quote for this
//! ticker?". The answer carries price, daily change, volume, the 52-week
//! range and, when the provider publishes it, book value per share and
//! price-to-book. Everything downstream (dating, persistence, dedup) is the
//! caller's concern.
//!
//! ```text
//! ticker ──► MarketDataProvider ──► Quote
//!                 │
//!                 └─ BrapiProvider (HTTP, rate limited)
//! ```
//!
//! # Core Types
//!
//! - [`Quote`] - Latest quote snapshot as reported by a provider
//! - [`MarketDataProvider`] - Trait every provider implements
//! - [`RateLimit`] - Concurrency and pacing limits advertised by a provider
//! - [`MarketDataError`] - Failure classification for a single fetch

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::Quote;
pub use provider::brapi::BrapiProvider;
pub use provider::{MarketDataProvider, RateLimit};
