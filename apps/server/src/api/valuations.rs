use std::sync::Arc;

use crate::{auth::UserId, error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Json, Router};
use fiifolio_core::valuations::{NewValuation, Valuation};

async fn list_valuations(
    user: UserId,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Valuation>>> {
    let valuations = state.valuation_service.get_valuations(user.as_str())?;
    Ok(Json(valuations))
}

async fn save_valuation(
    user: UserId,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<NewValuation>,
) -> ApiResult<Json<Valuation>> {
    payload.user_id = user.0;
    let valuation = state.valuation_service.save_valuation(payload).await?;
    Ok(Json(valuation))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/valuations", get(list_valuations).post(save_valuation))
}
