use super::assets_model::{Asset, CatalogAsset, NewAsset, NewCatalogAsset};
use crate::errors::Result;

/// Trait defining the contract for Asset service operations.
#[async_trait::async_trait]
pub trait AssetServiceTrait: Send + Sync {
    fn get_assets(&self, user_id: &str) -> Result<Vec<Asset>>;
    fn get_asset(&self, user_id: &str, asset_id: &str) -> Result<Asset>;
    async fn save_asset(&self, new_asset: NewAsset) -> Result<Asset>;
    async fn delete_asset(&self, user_id: &str, asset_id: &str) -> Result<()>;

    fn get_catalog(&self, user_id: &str) -> Result<Vec<CatalogAsset>>;
    async fn save_catalog_entry(&self, entry: NewCatalogAsset) -> Result<CatalogAsset>;
    async fn delete_catalog_entry(&self, user_id: &str, catalog_id: &str) -> Result<()>;
    /// Upserts a catalog entry for every held asset. Returns entries written.
    async fn sync_catalog_from_assets(&self, user_id: &str) -> Result<usize>;
}

/// Trait defining the contract for Asset repository operations.
#[async_trait::async_trait]
pub trait AssetRepositoryTrait: Send + Sync {
    /// Inserts or updates an asset. Updates by `id` when present, otherwise
    /// upserts on `(user_id, ticker)`.
    async fn upsert(&self, new_asset: NewAsset) -> Result<Asset>;
    fn get_by_id(&self, user_id: &str, asset_id: &str) -> Result<Asset>;
    fn list(&self, user_id: &str) -> Result<Vec<Asset>>;
    /// Every user's assets. Used by batch jobs running outside a user scope.
    fn list_all(&self) -> Result<Vec<Asset>>;
    /// Deletes the asset and its dependent records. Returns rows removed.
    async fn delete(&self, user_id: &str, asset_id: &str) -> Result<usize>;
}

/// Trait defining the contract for the reference catalog repository.
#[async_trait::async_trait]
pub trait AssetCatalogRepositoryTrait: Send + Sync {
    /// Upserts on `(user_id, ticker)`.
    async fn upsert(&self, entry: NewCatalogAsset) -> Result<CatalogAsset>;
    fn list(&self, user_id: &str) -> Result<Vec<CatalogAsset>>;
    fn list_all(&self) -> Result<Vec<CatalogAsset>>;
    async fn delete(&self, user_id: &str, catalog_id: &str) -> Result<usize>;
}
