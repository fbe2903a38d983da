use super::fundamentals_model::{Fundamentals, NewFundamentals};
use crate::errors::Result;

#[async_trait::async_trait]
pub trait FundamentalsRepositoryTrait: Send + Sync {
    /// Upserts on `(user_id, asset_id)`.
    async fn upsert(&self, new_fundamentals: NewFundamentals) -> Result<Fundamentals>;
    fn list(&self, user_id: &str) -> Result<Vec<Fundamentals>>;
}

#[async_trait::async_trait]
pub trait FundamentalsServiceTrait: Send + Sync {
    fn get_fundamentals(&self, user_id: &str) -> Result<Vec<Fundamentals>>;
    async fn save_fundamentals(&self, new_fundamentals: NewFundamentals) -> Result<Fundamentals>;
}
