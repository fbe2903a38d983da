use std::sync::Arc;

use crate::{auth::UserId, error::ApiResult, main_lib::AppState, models::SettingsView};
use axum::{extract::State, routing::get, Json, Router};
use fiifolio_core::settings::SettingsUpdate;

async fn get_settings(
    user: UserId,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SettingsView>> {
    let settings = state.settings_service.get_settings(user.as_str())?;
    Ok(Json(settings.into()))
}

async fn update_settings(
    user: UserId,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SettingsUpdate>,
) -> ApiResult<Json<SettingsView>> {
    let settings = state
        .settings_service
        .update_settings(user.as_str(), &payload)
        .await?;
    Ok(Json(settings.into()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/settings", get(get_settings).put(update_settings))
}
