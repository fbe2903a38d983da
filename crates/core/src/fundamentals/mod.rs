//! Fundamentals module - vacancy, leverage and liquidity per asset.

mod fundamentals_model;
mod fundamentals_service;
mod fundamentals_traits;

pub use fundamentals_model::{Fundamentals, NewFundamentals};
pub use fundamentals_service::FundamentalsService;
pub use fundamentals_traits::{FundamentalsRepositoryTrait, FundamentalsServiceTrait};
