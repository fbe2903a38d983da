use log::debug;
use std::sync::Arc;

use super::incomes_model::{Income, NewIncome};
use super::incomes_traits::{IncomeRepositoryTrait, IncomeServiceTrait};
use crate::assets::AssetRepositoryTrait;
use crate::errors::{Error, Result};
use crate::positions::PositionRepositoryTrait;

pub struct IncomeService {
    income_repository: Arc<dyn IncomeRepositoryTrait>,
    asset_repository: Arc<dyn AssetRepositoryTrait>,
    position_repository: Arc<dyn PositionRepositoryTrait>,
}

impl IncomeService {
    pub fn new(
        income_repository: Arc<dyn IncomeRepositoryTrait>,
        asset_repository: Arc<dyn AssetRepositoryTrait>,
        position_repository: Arc<dyn PositionRepositoryTrait>,
    ) -> Self {
        Self {
            income_repository,
            asset_repository,
            position_repository,
        }
    }
}

#[async_trait::async_trait]
impl IncomeServiceTrait for IncomeService {
    fn get_incomes(&self, user_id: &str) -> Result<Vec<Income>> {
        self.income_repository.list(user_id)
    }

    async fn save_income(&self, mut new_income: NewIncome) -> Result<Income> {
        new_income.validate()?;
        self.asset_repository
            .get_by_id(&new_income.user_id, &new_income.asset_id)?;

        if new_income.needs_derived_amount() {
            let position = self
                .position_repository
                .get_by_asset(&new_income.user_id, &new_income.asset_id)?;
            if let (Some(position), Some(per_share)) = (position, new_income.amount_per_share) {
                if position.quantity > 0.0 {
                    new_income.amount = Some(per_share * position.quantity);
                    debug!(
                        "Derived income amount for asset {} in {} from {} shares",
                        new_income.asset_id, new_income.month, position.quantity
                    );
                }
            }
        }

        self.income_repository.upsert(new_income).await
    }

    async fn delete_income(&self, user_id: &str, income_id: &str) -> Result<()> {
        let removed = self.income_repository.delete(user_id, income_id).await?;
        if removed == 0 {
            return Err(Error::NotFound(format!("Income {}", income_id)));
        }
        Ok(())
    }
}
