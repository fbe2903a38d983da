use std::sync::Arc;

use super::positions_model::{NewPosition, Position};
use super::positions_traits::{PositionRepositoryTrait, PositionServiceTrait};
use crate::assets::AssetRepositoryTrait;
use crate::errors::Result;

pub struct PositionService {
    position_repository: Arc<dyn PositionRepositoryTrait>,
    asset_repository: Arc<dyn AssetRepositoryTrait>,
}

impl PositionService {
    pub fn new(
        position_repository: Arc<dyn PositionRepositoryTrait>,
        asset_repository: Arc<dyn AssetRepositoryTrait>,
    ) -> Self {
        Self {
            position_repository,
            asset_repository,
        }
    }
}

#[async_trait::async_trait]
impl PositionServiceTrait for PositionService {
    fn get_positions(&self, user_id: &str) -> Result<Vec<Position>> {
        self.position_repository.list(user_id)
    }

    async fn save_position(&self, new_position: NewPosition) -> Result<Position> {
        new_position.validate()?;
        // The asset must exist and belong to the same user
        self.asset_repository
            .get_by_id(&new_position.user_id, &new_position.asset_id)?;
        self.position_repository.upsert(new_position).await
    }
}
