//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all providers implement
//! - Rate limiting configuration advertised by providers
//! - Concrete provider implementations (Brapi)

mod capabilities;
mod traits;

pub mod brapi;

// Re-exports
pub use capabilities::RateLimit;
pub use traits::MarketDataProvider;
