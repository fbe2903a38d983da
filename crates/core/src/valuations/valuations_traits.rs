use chrono::NaiveDate;

use super::valuations_model::{NewValuation, Valuation};
use crate::errors::Result;

#[async_trait::async_trait]
pub trait ValuationRepositoryTrait: Send + Sync {
    async fn insert(&self, new_valuation: NewValuation) -> Result<Valuation>;
    /// Appends every valuation in one write. Returns rows inserted.
    async fn insert_many(&self, new_valuations: Vec<NewValuation>) -> Result<usize>;
    fn list(&self, user_id: &str) -> Result<Vec<Valuation>>;
    /// Returns the subset of `(asset_id, date)` pairs that already have at
    /// least one valuation.
    fn find_existing(&self, keys: &[(String, NaiveDate)]) -> Result<Vec<(String, NaiveDate)>>;
}

#[async_trait::async_trait]
pub trait ValuationServiceTrait: Send + Sync {
    fn get_valuations(&self, user_id: &str) -> Result<Vec<Valuation>>;
    async fn save_valuation(&self, new_valuation: NewValuation) -> Result<Valuation>;
}
