use std::sync::Arc;

use crate::{auth::UserId, error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Json, Router};
use fiifolio_core::quotes::{CatalogQuote, MarketQuote};

async fn list_quotes(
    user: UserId,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<MarketQuote>>> {
    let quotes = state.quote_service.get_quotes(user.as_str())?;
    Ok(Json(quotes))
}

async fn list_catalog_quotes(
    user: UserId,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CatalogQuote>>> {
    let quotes = state.quote_service.get_catalog_quotes(user.as_str())?;
    Ok(Json(quotes))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/quotes", get(list_quotes))
        .route("/catalog/quotes", get(list_catalog_quotes))
}
