//! Assets module - held funds and the reference catalog.

mod assets_model;
mod assets_service;
mod assets_traits;

pub use assets_model::{
    normalize_ticker, Asset, AssetStatus, AssetType, CatalogAsset, NewAsset, NewCatalogAsset,
};
pub use assets_service::AssetService;
pub use assets_traits::{AssetCatalogRepositoryTrait, AssetRepositoryTrait, AssetServiceTrait};
