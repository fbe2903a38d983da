use std::sync::Arc;

use crate::{auth::UserId, error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Json, Router};
use fiifolio_core::fundamentals::{Fundamentals, NewFundamentals};

async fn list_fundamentals(
    user: UserId,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Fundamentals>>> {
    let fundamentals = state.fundamentals_service.get_fundamentals(user.as_str())?;
    Ok(Json(fundamentals))
}

async fn save_fundamentals(
    user: UserId,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<NewFundamentals>,
) -> ApiResult<Json<Fundamentals>> {
    payload.user_id = user.0;
    let fundamentals = state.fundamentals_service.save_fundamentals(payload).await?;
    Ok(Json(fundamentals))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/fundamentals",
        get(list_fundamentals).post(save_fundamentals),
    )
}
