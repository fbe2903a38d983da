use std::sync::Arc;

use crate::{auth::UserId, error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use fiifolio_core::assets::{Asset, NewAsset};

async fn list_assets(
    user: UserId,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Asset>>> {
    let assets = state.asset_service.get_assets(user.as_str())?;
    Ok(Json(assets))
}

async fn save_asset(
    user: UserId,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<NewAsset>,
) -> ApiResult<Json<Asset>> {
    payload.user_id = user.0;
    let asset = state.asset_service.save_asset(payload).await?;
    Ok(Json(asset))
}

async fn delete_asset(
    user: UserId,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.asset_service.delete_asset(user.as_str(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/assets", get(list_assets).post(save_asset))
        .route("/assets/{id}", delete(delete_asset))
}
