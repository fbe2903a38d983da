use std::sync::Arc;

use crate::{auth::UserId, error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use fiifolio_core::incomes::{Income, NewIncome};

async fn list_incomes(
    user: UserId,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Income>>> {
    let incomes = state.income_service.get_incomes(user.as_str())?;
    Ok(Json(incomes))
}

async fn save_income(
    user: UserId,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<NewIncome>,
) -> ApiResult<Json<Income>> {
    payload.user_id = user.0;
    let income = state.income_service.save_income(payload).await?;
    Ok(Json(income))
}

async fn delete_income(
    user: UserId,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.income_service.delete_income(user.as_str(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/incomes", get(list_incomes).post(save_income))
        .route("/incomes/{id}", delete(delete_income))
}
