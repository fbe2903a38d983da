use std::sync::Arc;

use crate::{auth::UserId, error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use fiifolio_core::utils::csv_io::{CsvEntity, ImportReport};

async fn export_csv(
    user: UserId,
    Path(entity): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<impl IntoResponse> {
    let entity: CsvEntity = entity.parse()?;
    let body = state.transfer_service.export_csv(user.as_str(), entity)?;
    let disposition = format!("attachment; filename=\"{}.csv\"", entity);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

async fn import_csv(
    user: UserId,
    Path(entity): Path<String>,
    State(state): State<Arc<AppState>>,
    body: String,
) -> ApiResult<Json<ImportReport>> {
    let entity: CsvEntity = entity.parse()?;
    let report = state
        .transfer_service
        .import_csv(user.as_str(), entity, &body)
        .await?;
    tracing::info!(
        "Imported {} {} rows for {} ({} skipped)",
        report.imported,
        entity,
        user.as_str(),
        report.skipped
    );
    Ok(Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/export/{entity}", get(export_csv))
        .route("/import/{entity}", post(import_csv))
}
