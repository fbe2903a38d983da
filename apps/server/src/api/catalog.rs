use std::sync::Arc;

use crate::{auth::UserId, error::ApiResult, main_lib::AppState, models::CatalogSyncResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use fiifolio_core::assets::{CatalogAsset, NewCatalogAsset};

async fn list_catalog(
    user: UserId,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CatalogAsset>>> {
    let entries = state.asset_service.get_catalog(user.as_str())?;
    Ok(Json(entries))
}

async fn save_catalog_entry(
    user: UserId,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<NewCatalogAsset>,
) -> ApiResult<Json<CatalogAsset>> {
    payload.user_id = user.0;
    let entry = state.asset_service.save_catalog_entry(payload).await?;
    Ok(Json(entry))
}

async fn delete_catalog_entry(
    user: UserId,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state
        .asset_service
        .delete_catalog_entry(user.as_str(), &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn sync_catalog(
    user: UserId,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CatalogSyncResponse>> {
    let synced = state
        .asset_service
        .sync_catalog_from_assets(user.as_str())
        .await?;
    Ok(Json(CatalogSyncResponse { synced }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/catalog", get(list_catalog).post(save_catalog_entry))
        .route("/catalog/sync", post(sync_catalog))
        .route("/catalog/{id}", delete(delete_catalog_entry))
}
