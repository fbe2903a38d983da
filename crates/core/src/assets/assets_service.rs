use log::debug;
use std::sync::Arc;

use super::assets_model::{Asset, CatalogAsset, NewAsset, NewCatalogAsset};
use super::assets_traits::{AssetCatalogRepositoryTrait, AssetRepositoryTrait, AssetServiceTrait};
use crate::errors::{Error, Result};

/// Service for managing held assets and the reference catalog.
pub struct AssetService {
    asset_repository: Arc<dyn AssetRepositoryTrait>,
    catalog_repository: Arc<dyn AssetCatalogRepositoryTrait>,
}

impl AssetService {
    pub fn new(
        asset_repository: Arc<dyn AssetRepositoryTrait>,
        catalog_repository: Arc<dyn AssetCatalogRepositoryTrait>,
    ) -> Self {
        Self {
            asset_repository,
            catalog_repository,
        }
    }
}

#[async_trait::async_trait]
impl AssetServiceTrait for AssetService {
    fn get_assets(&self, user_id: &str) -> Result<Vec<Asset>> {
        self.asset_repository.list(user_id)
    }

    fn get_asset(&self, user_id: &str, asset_id: &str) -> Result<Asset> {
        self.asset_repository.get_by_id(user_id, asset_id)
    }

    async fn save_asset(&self, mut new_asset: NewAsset) -> Result<Asset> {
        new_asset.validate()?;
        if let Some(id) = new_asset.id.as_deref() {
            // Editing must not move an asset between users
            self.asset_repository.get_by_id(&new_asset.user_id, id)?;
        }
        debug!("Saving asset {} for user {}", new_asset.ticker, new_asset.user_id);
        self.asset_repository.upsert(new_asset).await
    }

    async fn delete_asset(&self, user_id: &str, asset_id: &str) -> Result<()> {
        let removed = self.asset_repository.delete(user_id, asset_id).await?;
        if removed == 0 {
            return Err(Error::NotFound(format!("Asset {}", asset_id)));
        }
        Ok(())
    }

    fn get_catalog(&self, user_id: &str) -> Result<Vec<CatalogAsset>> {
        self.catalog_repository.list(user_id)
    }

    async fn save_catalog_entry(&self, mut entry: NewCatalogAsset) -> Result<CatalogAsset> {
        entry.validate()?;
        self.catalog_repository.upsert(entry).await
    }

    async fn delete_catalog_entry(&self, user_id: &str, catalog_id: &str) -> Result<()> {
        let removed = self.catalog_repository.delete(user_id, catalog_id).await?;
        if removed == 0 {
            return Err(Error::NotFound(format!("Catalog entry {}", catalog_id)));
        }
        Ok(())
    }

    async fn sync_catalog_from_assets(&self, user_id: &str) -> Result<usize> {
        let assets = self.asset_repository.list(user_id)?;
        let mut written = 0;
        for asset in assets {
            let mut entry = NewCatalogAsset {
                id: None,
                user_id: asset.user_id,
                ticker: asset.ticker,
                name: asset.name,
                asset_type: asset.asset_type,
                sector: asset.sector,
            };
            entry.validate()?;
            self.catalog_repository.upsert(entry).await?;
            written += 1;
        }
        debug!("Synced {} catalog entries for user {}", written, user_id);
        Ok(written)
    }
}
