use std::sync::Arc;

use crate::{
    auth::UserId,
    error::ApiResult,
    main_lib::AppState,
    models::{AnalysisQuery, ReferenceQuery},
};
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use fiifolio_core::{
    insights::{AnalysisFilter, AnalysisReport, DashboardSummary, MarketRow},
    utils::today_utc,
};

async fn get_dashboard(
    user: UserId,
    State(state): State<Arc<AppState>>,
    Query(q): Query<ReferenceQuery>,
) -> ApiResult<Json<DashboardSummary>> {
    let reference = q.date.unwrap_or_else(today_utc);
    let summary = state
        .insights_service
        .get_dashboard(user.as_str(), reference)?;
    Ok(Json(summary))
}

async fn get_analysis(
    user: UserId,
    State(state): State<Arc<AppState>>,
    Query(q): Query<AnalysisQuery>,
) -> ApiResult<Json<AnalysisReport>> {
    let filter = match q.filter.as_deref() {
        Some(raw) => raw.parse::<AnalysisFilter>()?,
        None => AnalysisFilter::All,
    };
    let reference = q.date.unwrap_or_else(today_utc);
    let report = state
        .insights_service
        .get_analysis(user.as_str(), filter, reference)?;
    Ok(Json(report))
}

async fn get_market(
    user: UserId,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<MarketRow>>> {
    let rows = state.insights_service.get_market(user.as_str())?;
    Ok(Json(rows))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/analysis", get(get_analysis))
        .route("/market", get(get_market))
}
