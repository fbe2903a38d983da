use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::post, Json, Router};
use fiifolio_core::quotes::ReconciliationSummary;

/// Refreshes quotes for every user's assets and catalog.
async fn update_market(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ReconciliationSummary>> {
    let summary = state.reconciliation_service.reconcile().await?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/market/update", post(update_market))
}
