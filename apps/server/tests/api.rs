use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use fiifolio_market_data::{MarketDataError, MarketDataProvider, Quote, RateLimit};
use fiifolio_server::{api::app_router, build_state_with_provider, config::Config};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

struct StaticProvider {
    quotes: HashMap<String, Quote>,
}

#[async_trait]
impl MarketDataProvider for StaticProvider {
    fn id(&self) -> &'static str {
        "STATIC"
    }

    fn rate_limit(&self) -> RateLimit {
        RateLimit {
            max_concurrency: 2,
            min_delay: Duration::ZERO,
        }
    }

    async fn get_latest_quote(&self, ticker: &str) -> Result<Quote, MarketDataError> {
        self.quotes
            .get(ticker)
            .cloned()
            .ok_or_else(|| MarketDataError::SymbolNotFound(ticker.to_string()))
    }
}

fn test_config(dir: &TempDir) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: dir.path().join("test.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        brapi_base_url: "http://127.0.0.1:9".to_string(),
        brapi_token: None,
        quote_refresh_interval: None,
        quote_max_concurrency: 2,
        log_format: "text".to_string(),
    }
}

async fn build_test_router(dir: &TempDir) -> Router {
    let mut quote = Quote::new("HGLG11", 165.0, "brapi");
    quote.change_percent = Some(1.2);
    quote.market_time = Some("2024-06-14T20:07:00.000Z".to_string());
    quote.price_to_book = Some(0.95);
    let provider = Arc::new(StaticProvider {
        quotes: HashMap::from([("HGLG11".to_string(), quote)]),
    });

    let config = test_config(dir);
    let state = build_state_with_provider(&config, provider).await.unwrap();
    app_router(state, &config)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn create_asset(app: &Router, user: &str, ticker: &str) -> String {
    let (status, asset) = send(
        app,
        Method::POST,
        "/api/v1/assets",
        Some(user),
        Some(json!({ "ticker": ticker, "type": "brick" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    asset["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn healthz_works_without_user() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_router(&dir).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn missing_user_header_is_unauthorized() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_router(&dir).await;

    let (status, body) = send(&app, Method::GET, "/api/v1/assets", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 401);
    assert!(body["message"].as_str().unwrap().contains("x-user-id"));
}

#[tokio::test]
async fn assets_are_normalised_and_scoped_by_user() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_router(&dir).await;

    let id = create_asset(&app, "alice", " hglg11 ").await;

    let (status, assets) = send(&app, Method::GET, "/api/v1/assets", Some("alice"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(assets.as_array().unwrap().len(), 1);
    assert_eq!(assets[0]["ticker"], "HGLG11");
    assert_eq!(assets[0]["type"], "brick");

    let (_, others) = send(&app, Method::GET, "/api/v1/assets", Some("bob"), None).await;
    assert!(others.as_array().unwrap().is_empty());

    let uri = format!("/api/v1/assets/{}", id);
    let (status, _) = send(&app, Method::DELETE, &uri, Some("bob"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, &uri, Some("alice"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn empty_ticker_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_router(&dir).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/assets",
        Some("alice"),
        Some(json!({ "ticker": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn income_amount_is_derived_from_position() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_router(&dir).await;
    let asset_id = create_asset(&app, "alice", "HGLG11").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/positions",
        Some("alice"),
        Some(json!({ "assetId": asset_id, "quantity": 100.0, "avgPrice": 150.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, income) = send(
        &app,
        Method::POST,
        "/api/v1/incomes",
        Some("alice"),
        Some(json!({ "assetId": asset_id, "month": "2024-05", "amountPerShare": 1.1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!((income["amount"].as_f64().unwrap() - 110.0).abs() < 1e-9);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/incomes",
        Some("alice"),
        Some(json!({ "assetId": asset_id, "month": "2024-13", "amount": 10.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn settings_resolve_defaults_and_merge_updates() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_router(&dir).await;

    let (status, settings) = send(&app, Method::GET, "/api/v1/settings", Some("alice"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["effectiveGoalAmount"], 100000.0);
    assert_eq!(settings["thresholds"]["vacancyPct"], 0.15);

    send(
        &app,
        Method::PUT,
        "/api/v1/settings",
        Some("alice"),
        Some(json!({ "goalAmount": 50000.0 })),
    )
    .await;
    let (_, settings) = send(
        &app,
        Method::PUT,
        "/api/v1/settings",
        Some("alice"),
        Some(json!({ "alertVacancyPct": 0.1 })),
    )
    .await;
    assert_eq!(settings["goalAmount"], 50000.0);
    assert_eq!(settings["thresholds"]["vacancyPct"], 0.1);
}

#[tokio::test]
async fn dashboard_reports_invested_value_and_goal() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_router(&dir).await;
    let asset_id = create_asset(&app, "alice", "HGLG11").await;
    send(
        &app,
        Method::POST,
        "/api/v1/positions",
        Some("alice"),
        Some(json!({ "assetId": asset_id, "quantity": 100.0, "avgPrice": 100.0 })),
    )
    .await;

    let (status, dashboard) = send(
        &app,
        Method::GET,
        "/api/v1/dashboard?date=2024-06-15",
        Some("alice"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["investedValue"], 10000.0);
    assert_eq!(dashboard["goalProgress"], 0.1);
    assert_eq!(dashboard["rows"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_analysis_filter_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_router(&dir).await;

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/v1/analysis?filter=bogus",
        Some("alice"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, report) = send(
        &app,
        Method::GET,
        "/api/v1/analysis?filter=risk",
        Some("alice"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["filter"], "risk");
}

#[tokio::test]
async fn csv_import_then_export() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_router(&dir).await;

    let csv = "ticker;name;type;sector;status;notes\nhglg11;CSHG Log;tijolo;Logistica;ok;\nMXRF11;;papel;;;\n";
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/import/assets")
                .header("x-user-id", "alice")
                .header(header::CONTENT_TYPE, "text/csv")
                .body(Body::from(csv))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let report: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(report["imported"], 2);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/export/assets")
                .header("x-user-id", "alice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.starts_with("ticker,name,type,sector,status,notes"));
    assert!(text.contains("HGLG11,CSHG Log,brick,Logistica,ok,"));

    let (status, _) = send(&app, Method::GET, "/api/v1/export/trades", Some("alice"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn market_update_reconciles_all_users() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_router(&dir).await;

    let (_, summary) = send(&app, Method::POST, "/api/v1/market/update", None, None).await;
    assert_eq!(summary["message"], "No assets found");

    create_asset(&app, "alice", "HGLG11").await;
    create_asset(&app, "bob", "HGLG11").await;
    create_asset(&app, "bob", "XPTO11").await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/catalog/sync",
        Some("bob"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, summary) = send(&app, Method::POST, "/api/v1/market/update", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["tickers"], 2);
    assert_eq!(summary["updatedAssets"], 2);
    assert_eq!(summary["updatedCatalog"], 1);
    assert_eq!(summary["updatedValuations"], 2);
    assert!(summary.get("message").is_none());

    let (_, quotes) = send(&app, Method::GET, "/api/v1/quotes", Some("alice"), None).await;
    assert_eq!(quotes.as_array().unwrap().len(), 1);
    assert_eq!(quotes[0]["date"], "2024-06-14");
    assert_eq!(quotes[0]["price"], 165.0);

    let (_, market) = send(&app, Method::GET, "/api/v1/market", Some("bob"), None).await;
    let rows = market.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    let hglg = rows.iter().find(|r| r["ticker"] == "HGLG11").unwrap();
    assert_eq!(hglg["quote"]["price"], 165.0);
    let xpto = rows.iter().find(|r| r["ticker"] == "XPTO11").unwrap();
    assert!(xpto["quote"].is_null());
}
