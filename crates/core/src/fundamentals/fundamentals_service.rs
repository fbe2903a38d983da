use std::sync::Arc;

use super::fundamentals_model::{Fundamentals, NewFundamentals};
use super::fundamentals_traits::{FundamentalsRepositoryTrait, FundamentalsServiceTrait};
use crate::assets::AssetRepositoryTrait;
use crate::errors::Result;

pub struct FundamentalsService {
    fundamentals_repository: Arc<dyn FundamentalsRepositoryTrait>,
    asset_repository: Arc<dyn AssetRepositoryTrait>,
}

impl FundamentalsService {
    pub fn new(
        fundamentals_repository: Arc<dyn FundamentalsRepositoryTrait>,
        asset_repository: Arc<dyn AssetRepositoryTrait>,
    ) -> Self {
        Self {
            fundamentals_repository,
            asset_repository,
        }
    }
}

#[async_trait::async_trait]
impl FundamentalsServiceTrait for FundamentalsService {
    fn get_fundamentals(&self, user_id: &str) -> Result<Vec<Fundamentals>> {
        self.fundamentals_repository.list(user_id)
    }

    async fn save_fundamentals(&self, new_fundamentals: NewFundamentals) -> Result<Fundamentals> {
        new_fundamentals.validate()?;
        self.asset_repository
            .get_by_id(&new_fundamentals.user_id, &new_fundamentals.asset_id)?;
        self.fundamentals_repository.upsert(new_fundamentals).await
    }
}
