use std::sync::Arc;

use crate::{auth::UserId, error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Json, Router};
use fiifolio_core::positions::{NewPosition, Position};

async fn list_positions(
    user: UserId,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Position>>> {
    let positions = state.position_service.get_positions(user.as_str())?;
    Ok(Json(positions))
}

async fn save_position(
    user: UserId,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<NewPosition>,
) -> ApiResult<Json<Position>> {
    payload.user_id = user.0;
    let position = state.position_service.save_position(payload).await?;
    Ok(Json(position))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/positions", get(list_positions).post(save_position))
}
