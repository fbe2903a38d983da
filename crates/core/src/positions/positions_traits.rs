use super::positions_model::{NewPosition, Position};
use crate::errors::Result;

#[async_trait::async_trait]
pub trait PositionRepositoryTrait: Send + Sync {
    /// Upserts on `(user_id, asset_id)`.
    async fn upsert(&self, new_position: NewPosition) -> Result<Position>;
    fn list(&self, user_id: &str) -> Result<Vec<Position>>;
    fn get_by_asset(&self, user_id: &str, asset_id: &str) -> Result<Option<Position>>;
}

#[async_trait::async_trait]
pub trait PositionServiceTrait: Send + Sync {
    fn get_positions(&self, user_id: &str) -> Result<Vec<Position>>;
    async fn save_position(&self, new_position: NewPosition) -> Result<Position>;
}
