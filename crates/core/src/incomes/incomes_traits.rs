use super::incomes_model::{Income, NewIncome};
use crate::errors::Result;

#[async_trait::async_trait]
pub trait IncomeRepositoryTrait: Send + Sync {
    /// Upserts on `(user_id, asset_id, month)`.
    async fn upsert(&self, new_income: NewIncome) -> Result<Income>;
    fn list(&self, user_id: &str) -> Result<Vec<Income>>;
    async fn delete(&self, user_id: &str, income_id: &str) -> Result<usize>;
}

#[async_trait::async_trait]
pub trait IncomeServiceTrait: Send + Sync {
    fn get_incomes(&self, user_id: &str) -> Result<Vec<Income>>;
    async fn save_income(&self, new_income: NewIncome) -> Result<Income>;
    async fn delete_income(&self, user_id: &str, income_id: &str) -> Result<()>;
}
