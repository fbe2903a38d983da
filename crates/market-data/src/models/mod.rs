//! Market data models
//!
//! - `quote` - Latest quote snapshot returned by providers (Quote)

mod quote;

pub use quote::Quote;
