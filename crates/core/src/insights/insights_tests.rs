use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use crate::analytics::Signal;
use crate::assets::AssetType;
use crate::fundamentals::Fundamentals;
use crate::incomes::Income;
use crate::insights::{AnalysisFilter, InsightsRepositories, InsightsService, InsightsServiceTrait};
use crate::quotes::{CatalogQuote, MarketQuote};
use crate::test_support::InMemoryStore;
use crate::utils::MonthKey;
use crate::valuations::Valuation;

const USER: &str = "u1";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn created() -> NaiveDateTime {
    date(2024, 6, 1).and_hms_opt(12, 0, 0).unwrap()
}

fn reference() -> NaiveDate {
    date(2024, 6, 15)
}

fn service(store: &Arc<InMemoryStore>) -> InsightsService {
    InsightsService::new(InsightsRepositories {
        assets: store.clone(),
        positions: store.clone(),
        incomes: store.clone(),
        valuations: store.clone(),
        fundamentals: store.clone(),
        market_quotes: store.clone(),
        catalog: store.clone(),
        catalog_quotes: store.clone(),
        settings: store.clone(),
    })
}

fn set_type(store: &InMemoryStore, asset_id: &str, asset_type: AssetType) {
    let mut assets = store.assets.lock().unwrap();
    if let Some(asset) = assets.iter_mut().find(|a| a.id == asset_id) {
        asset.asset_type = Some(asset_type);
    }
}

fn add_income(store: &InMemoryStore, asset_id: &str, month: MonthKey, amount: f64) {
    store.incomes.lock().unwrap().push(Income {
        id: format!("{}-{}", asset_id, month),
        user_id: USER.to_string(),
        asset_id: asset_id.to_string(),
        month,
        amount: Some(amount),
        amount_per_share: None,
        created_at: created(),
    });
}

fn add_quote(store: &InMemoryStore, asset_id: &str, day: NaiveDate, price: f64, change: f64) {
    store.market_quotes.lock().unwrap().push(MarketQuote {
        id: format!("{}-{}", asset_id, day),
        user_id: USER.to_string(),
        asset_id: asset_id.to_string(),
        date: day,
        price: Some(price),
        change: None,
        change_percent: Some(change),
        volume: None,
        week_52_high: None,
        week_52_low: None,
        source: Some("brapi".to_string()),
        created_at: created(),
    });
}

fn add_valuation(store: &InMemoryStore, asset_id: &str, day: NaiveDate, price_to_book: f64) {
    store.valuations.lock().unwrap().push(Valuation {
        id: format!("{}-{}", asset_id, day),
        user_id: USER.to_string(),
        asset_id: asset_id.to_string(),
        date: Some(day),
        price: None,
        book_value_per_share: None,
        price_to_book: Some(price_to_book),
        source: Some("manual".to_string()),
        created_at: created(),
    });
}

/// HGLG11: brick fund, 10 000 invested, 100 a month for the last twelve
/// months. MXRF11: paper fund, 1 000 invested, no income, 20% vacancy.
fn seeded_store() -> (Arc<InMemoryStore>, String, String) {
    let store = Arc::new(InMemoryStore::new());

    let hglg = store.seed_asset(USER, "HGLG11");
    set_type(&store, &hglg, AssetType::Brick);
    store.seed_position(USER, &hglg, 100.0, 100.0);
    let mut month = MonthKey::new(2023, 7).unwrap();
    for _ in 0..12 {
        add_income(&store, &hglg, month, 100.0);
        month = month.succ();
    }
    add_quote(&store, &hglg, date(2024, 6, 10), 100.0, -0.5);
    add_quote(&store, &hglg, date(2024, 6, 14), 110.0, 1.5);
    add_valuation(&store, &hglg, date(2024, 1, 2), 0.9);
    add_valuation(&store, &hglg, date(2024, 6, 3), 1.25);

    let mxrf = store.seed_asset(USER, "MXRF11");
    set_type(&store, &mxrf, AssetType::Paper);
    store.seed_position(USER, &mxrf, 100.0, 10.0);
    add_quote(&store, &mxrf, date(2024, 6, 14), 9.0, -2.0);
    store.fundamentals.lock().unwrap().push(Fundamentals {
        id: "f1".to_string(),
        user_id: USER.to_string(),
        asset_id: mxrf.clone(),
        vacancy_financial: Some(0.2),
        debt_ratio: Some(0.5),
        ..Default::default()
    });

    (store, hglg, mxrf)
}

#[test]
fn test_dashboard_totals_and_income() {
    let (store, _, _) = seeded_store();
    let dashboard = service(&store).get_dashboard(USER, reference()).unwrap();

    assert_eq!(dashboard.invested_value, 11_000.0);
    assert_eq!(dashboard.income_by_month.len(), 12);
    assert_eq!(
        dashboard.income_by_month.last().unwrap().month,
        MonthKey::new(2024, 6).unwrap()
    );
    assert_eq!(dashboard.last_month_income, 100.0);
    assert!((dashboard.average_income_6m - 100.0).abs() < 1e-9);
    assert!((dashboard.average_income_12m - 100.0).abs() < 1e-9);
    assert_eq!(dashboard.goal_amount, 100_000.0);
    assert!((dashboard.goal_progress - 0.11).abs() < 1e-9);
}

#[test]
fn test_dashboard_market_value_uses_latest_quote() {
    let (store, hglg, _) = seeded_store();
    let dashboard = service(&store).get_dashboard(USER, reference()).unwrap();

    assert!((dashboard.market_value - 11_900.0).abs() < 1e-9);
    assert!((dashboard.market_delta - 900.0).abs() < 1e-9);
    assert!((dashboard.market_delta_pct - 900.0 / 11_000.0).abs() < 1e-9);
    assert_eq!(dashboard.latest_quote_date, Some(date(2024, 6, 14)));

    let row = dashboard.rows.iter().find(|r| r.asset_id == hglg).unwrap();
    assert_eq!(row.market_price, Some(110.0));
    assert_eq!(row.change_percent, Some(1.5));
    assert!((row.dy_12m - 0.12).abs() < 1e-12);
}

#[test]
fn test_dashboard_opportunity_uses_latest_valuation() {
    let (store, hglg, _) = seeded_store();
    let dashboard = service(&store).get_dashboard(USER, reference()).unwrap();

    // yield component 1.0, P/VP 1.25 component 0.5, no 52-week range
    let row = dashboard.rows.iter().find(|r| r.asset_id == hglg).unwrap();
    assert_eq!(row.opportunity_score, Some(79));
    assert_eq!(row.signal, Signal::Opportunity);
}

#[test]
fn test_dashboard_movers_and_concentration() {
    let (store, _, _) = seeded_store();
    let dashboard = service(&store).get_dashboard(USER, reference()).unwrap();

    let gainers: Vec<&str> = dashboard.top_gainers.iter().map(|m| m.ticker.as_str()).collect();
    let losers: Vec<&str> = dashboard.top_losers.iter().map(|m| m.ticker.as_str()).collect();
    assert_eq!(gainers, ["HGLG11", "MXRF11"]);
    assert_eq!(losers, ["MXRF11", "HGLG11"]);

    assert_eq!(dashboard.concentration_by_asset[0].label, "HGLG11");
    assert!((dashboard.concentration_by_asset[0].share - 10.0 / 11.0).abs() < 1e-9);
    assert_eq!(
        dashboard.concentration_by_type[0].label,
        AssetType::Brick.to_string()
    );
    assert_eq!(
        dashboard.concentration_by_type[1].label,
        AssetType::Paper.to_string()
    );
}

#[test]
fn test_dashboard_alerts() {
    let (store, _, _) = seeded_store();
    let dashboard = service(&store).get_dashboard(USER, reference()).unwrap();

    assert_eq!(
        dashboard.alerts,
        vec![
            "High concentration: 90.9% in a single asset.".to_string(),
            "MXRF11: vacancy 20.0%".to_string(),
        ]
    );
}

#[test]
fn test_dashboard_missing_income_alert_when_month_has_no_records() {
    let (store, _, _) = seeded_store();
    let dashboard = service(&store).get_dashboard(USER, date(2024, 8, 1)).unwrap();

    assert!(dashboard
        .alerts
        .iter()
        .any(|a| a.starts_with("Recent months without recorded income")));
}

#[test]
fn test_empty_portfolio_dashboard() {
    let store = Arc::new(InMemoryStore::new());
    let dashboard = service(&store).get_dashboard(USER, reference()).unwrap();

    assert_eq!(dashboard.invested_value, 0.0);
    assert_eq!(dashboard.market_delta_pct, 0.0);
    assert!(dashboard.rows.is_empty());
    assert!(dashboard.latest_quote_date.is_none());
    assert_eq!(
        dashboard.alerts,
        vec!["Recent months without recorded income. Check for missing data.".to_string()]
    );
}

#[test]
fn test_analysis_scores() {
    let (store, hglg, mxrf) = seeded_store();
    let report = service(&store)
        .get_analysis(USER, AnalysisFilter::All, reference())
        .unwrap();
    assert_eq!(report.rows.len(), 2);

    let strong = report.rows.iter().find(|r| r.asset_id == hglg).unwrap();
    assert_eq!(strong.income_score, Some(100));
    assert_eq!(strong.stability_score, Some(100));
    assert_eq!(strong.risk_score, None);
    assert_eq!(strong.composite_score, Some(100));
    assert_eq!(strong.signal, Signal::Opportunity);
    assert!((strong.dy_monthly - 0.01).abs() < 1e-12);
    assert_eq!(
        strong.valuation.as_ref().and_then(|v| v.price_to_book),
        Some(1.25)
    );

    // risk: vacancy 0.8 and debt 0.5 blended over 0.7 of weight
    let weak = report.rows.iter().find(|r| r.asset_id == mxrf).unwrap();
    assert_eq!(weak.income_score, Some(0));
    assert_eq!(weak.stability_score, Some(0));
    assert_eq!(weak.risk_score, Some(67));
    assert_eq!(weak.composite_score, Some(20));
    assert_eq!(weak.signal, Signal::Risk);
    assert_eq!(weak.dy_monthly, 0.0);
}

#[test]
fn test_analysis_filters() {
    let (store, hglg, mxrf) = seeded_store();
    let svc = service(&store);
    let ids = |filter: AnalysisFilter| -> Vec<String> {
        svc.get_analysis(USER, filter, reference())
            .unwrap()
            .rows
            .into_iter()
            .map(|r| r.asset_id)
            .collect()
    };

    assert_eq!(ids(AnalysisFilter::Opportunity), vec![hglg.clone()]);
    assert_eq!(ids(AnalysisFilter::Income), vec![hglg.clone()]);
    assert_eq!(ids(AnalysisFilter::Stable), vec![hglg]);
    assert_eq!(ids(AnalysisFilter::Risk), vec![mxrf.clone()]);
    assert_eq!(ids(AnalysisFilter::Vacancy), vec![mxrf]);
    assert!(ids(AnalysisFilter::NoData).is_empty());
}

#[test]
fn test_market_rows_use_latest_catalog_quote() {
    let store = Arc::new(InMemoryStore::new());
    let entry = store.seed_catalog(USER, "KNRI11");
    store.seed_catalog(USER, "VISC11");
    for (day, price) in [(date(2024, 6, 13), 150.0), (date(2024, 6, 14), 140.0)] {
        store.catalog_quotes.lock().unwrap().push(CatalogQuote {
            id: format!("cq-{}", day),
            user_id: USER.to_string(),
            catalog_id: entry.clone(),
            date: day,
            price: Some(price),
            change: None,
            change_percent: None,
            volume: None,
            week_52_high: Some(160.0),
            week_52_low: Some(120.0),
            source: Some("brapi".to_string()),
            created_at: created(),
        });
    }

    let rows = service(&store).get_market(USER).unwrap();
    assert_eq!(rows.len(), 2);

    let knri = rows.iter().find(|r| r.entry.id == entry).unwrap();
    assert_eq!(knri.quote.as_ref().and_then(|q| q.price), Some(140.0));
    assert!((knri.position_52w.unwrap() - 0.5).abs() < 1e-9);

    let visc = rows.iter().find(|r| r.entry.ticker == "VISC11").unwrap();
    assert!(visc.quote.is_none());
    assert!(visc.position_52w.is_none());
}
