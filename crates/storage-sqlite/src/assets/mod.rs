//! SQLite storage implementation for held assets and the reference catalog.

mod catalog_repository;
mod model;
mod repository;

pub use catalog_repository::AssetCatalogRepository;
pub use model::{AssetChangesetDB, AssetDB, CatalogAssetChangesetDB, CatalogAssetDB};
pub use repository::AssetRepository;
