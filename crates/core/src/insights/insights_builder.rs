//! Assembles view models from a user's records. Pure: the same snapshot and
//! reference date always produce the same output.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use super::insights_model::{
    AnalysisFilter, AnalysisReport, AnalysisRow, ConcentrationEntry, DashboardRow,
    DashboardSummary, MarketRow, Mover, MonthlyIncomePoint,
};
use crate::analytics::{
    alert_messages, average_recent, composite_score, concentration_by_asset,
    concentration_by_type, evaluate_alerts, fill_months, goal_progress, group_by_asset_and_month,
    group_by_month, income_score, invested_value, latest_catalog_quotes_by_entry, latest_month,
    latest_quotes_by_asset, latest_valuations_by_asset, market_delta, market_value,
    max_concentration, opportunity_score, price_gap, recent_month_keys, risk_score,
    stability_score, trailing_yield, AlertInputs, AssetAlertInput, MonthlyIncome,
    OpportunityInputs, RiskInputs, Signal,
};
use crate::assets::{Asset, CatalogAsset};
use crate::constants::{
    OPPORTUNITY_SIGNAL_MIN, RISK_SIGNAL_MAX, STABILITY_WINDOW_MONTHS, TOP_CONCENTRATION_LIMIT,
    TOP_MOVERS_LIMIT,
};
use crate::fundamentals::Fundamentals;
use crate::incomes::Income;
use crate::positions::Position;
use crate::quotes::{CatalogQuote, MarketQuote};
use crate::settings::Settings;
use crate::utils::MonthKey;
use crate::valuations::Valuation;

/// Everything stored for one user.
#[derive(Debug, Clone, Default)]
pub struct PortfolioSnapshot {
    pub assets: Vec<Asset>,
    pub positions: Vec<Position>,
    pub incomes: Vec<Income>,
    pub valuations: Vec<Valuation>,
    pub fundamentals: Vec<Fundamentals>,
    pub quotes: Vec<MarketQuote>,
    pub catalog: Vec<CatalogAsset>,
    pub catalog_quotes: Vec<CatalogQuote>,
    pub settings: Settings,
}

/// Lookups shared by the dashboard and analysis builders.
struct Indexed<'a> {
    positions: HashMap<&'a str, &'a Position>,
    fundamentals: HashMap<&'a str, &'a Fundamentals>,
    income_by_asset: HashMap<String, MonthlyIncome>,
    latest_quotes: HashMap<&'a str, &'a MarketQuote>,
    latest_valuations: HashMap<&'a str, &'a Valuation>,
}

impl<'a> Indexed<'a> {
    fn new(snapshot: &'a PortfolioSnapshot) -> Self {
        Self {
            positions: snapshot
                .positions
                .iter()
                .map(|p| (p.asset_id.as_str(), p))
                .collect(),
            fundamentals: snapshot
                .fundamentals
                .iter()
                .map(|f| (f.asset_id.as_str(), f))
                .collect(),
            income_by_asset: group_by_asset_and_month(&snapshot.incomes),
            latest_quotes: latest_quotes_by_asset(&snapshot.quotes),
            latest_valuations: latest_valuations_by_asset(&snapshot.valuations),
        }
    }

    fn invested(&self, asset_id: &str) -> f64 {
        self.positions
            .get(asset_id)
            .map(|p| p.invested_value())
            .unwrap_or(0.0)
    }

    fn trailing_yield(&self, asset_id: &str, invested: f64) -> f64 {
        self.income_by_asset
            .get(asset_id)
            .map(|m| trailing_yield(m, invested))
            .unwrap_or(0.0)
    }

    fn latest_quote_date(&self) -> Option<NaiveDate> {
        self.latest_quotes.values().map(|q| q.date).max()
    }
}

fn dashboard_row(asset: &Asset, idx: &Indexed<'_>) -> DashboardRow {
    let position = idx.positions.get(asset.id.as_str());
    let invested = idx.invested(&asset.id);
    let quote = idx.latest_quotes.get(asset.id.as_str());
    let valuation = idx.latest_valuations.get(asset.id.as_str());

    let market_price = quote.and_then(|q| q.price);
    let market_value = position.and_then(|p| {
        market_value(p.quantity, market_price.filter(|price| *price != 0.0))
    });
    let dy_12m = idx.trailing_yield(&asset.id, invested);

    let score = opportunity_score(&OpportunityInputs {
        trailing_yield: Some(dy_12m),
        price_to_book: valuation.and_then(|v| v.price_to_book),
        position_52w: quote.and_then(|q| q.position_52w()),
    });

    DashboardRow {
        asset_id: asset.id.clone(),
        ticker: asset.ticker.clone(),
        asset_type: asset.asset_type,
        invested,
        market_price,
        market_value,
        price_gap: price_gap(market_value, invested),
        dy_12m,
        change_percent: quote.and_then(|q| q.change_percent),
        opportunity_score: score,
        signal: Signal::from_score(score),
    }
}

fn movers(rows: &[DashboardRow]) -> (Vec<Mover>, Vec<Mover>) {
    let mut movers: Vec<Mover> = rows
        .iter()
        .filter_map(|row| {
            Some(Mover {
                ticker: row.ticker.clone(),
                change_percent: row.change_percent.filter(|c| c.is_finite())?,
                price: row.market_price,
            })
        })
        .collect();

    movers.sort_by(|a, b| b.change_percent.total_cmp(&a.change_percent));
    let gainers: Vec<Mover> = movers.iter().take(TOP_MOVERS_LIMIT).cloned().collect();
    let losers: Vec<Mover> = movers.iter().rev().take(TOP_MOVERS_LIMIT).cloned().collect();
    (gainers, losers)
}

fn sorted_desc(mut entries: Vec<ConcentrationEntry>) -> Vec<ConcentrationEntry> {
    entries.sort_by(|a, b| b.share.total_cmp(&a.share));
    entries
}

pub fn build_dashboard(snapshot: &PortfolioSnapshot, reference: NaiveDate) -> DashboardSummary {
    let idx = Indexed::new(snapshot);
    let invested_total = invested_value(&snapshot.positions);
    let portfolio_monthly = group_by_month(&snapshot.incomes);

    let rows: Vec<DashboardRow> = snapshot
        .assets
        .iter()
        .map(|a| dashboard_row(a, &idx))
        .collect();
    let (top_gainers, top_losers) = movers(&rows);

    let market_value_total: f64 = rows.iter().filter_map(|r| r.market_value).sum();
    let delta = market_delta(market_value_total, invested_total);

    let tickers: HashMap<&str, &str> = snapshot
        .assets
        .iter()
        .map(|a| (a.id.as_str(), a.ticker.as_str()))
        .collect();
    let by_asset = concentration_by_asset(&snapshot.positions);
    let mut concentration_assets = sorted_desc(
        by_asset
            .iter()
            .map(|(asset_id, share)| ConcentrationEntry {
                label: tickers
                    .get(asset_id.as_str())
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| asset_id.clone()),
                share: *share,
            })
            .collect(),
    );
    concentration_assets.truncate(TOP_CONCENTRATION_LIMIT);

    let concentration_types = sorted_desc(
        concentration_by_type(&snapshot.positions, &snapshot.assets)
            .into_iter()
            .map(|(asset_type, share)| ConcentrationEntry {
                label: asset_type.to_string(),
                share,
            })
            .collect(),
    );

    let months_with_income: BTreeSet<MonthKey> =
        snapshot.incomes.iter().map(|i| i.month).collect();
    let alert_assets: Vec<AssetAlertInput<'_>> = snapshot
        .assets
        .iter()
        .map(|a| AssetAlertInput {
            ticker: &a.ticker,
            vacancy: idx
                .fundamentals
                .get(a.id.as_str())
                .and_then(|f| f.vacancy()),
            monthly_income: idx.income_by_asset.get(&a.id),
        })
        .collect();
    let alerts = evaluate_alerts(&AlertInputs {
        max_asset_concentration: max_concentration(&by_asset),
        portfolio_monthly_income: &portfolio_monthly,
        months_with_income: &months_with_income,
        reference_date: reference,
        assets: alert_assets,
        thresholds: snapshot.settings.thresholds(),
    });

    let goal_amount = snapshot.settings.goal_amount();

    DashboardSummary {
        invested_value: invested_total,
        income_by_month: portfolio_monthly
            .iter()
            .map(|(month, amount)| MonthlyIncomePoint {
                month: *month,
                amount: *amount,
            })
            .collect(),
        last_month_income: latest_month(&portfolio_monthly)
            .map(|(_, v)| v)
            .unwrap_or(0.0),
        average_income_6m: average_recent(&portfolio_monthly, 6),
        average_income_12m: average_recent(&portfolio_monthly, 12),
        goal_amount,
        goal_progress: goal_progress(invested_total, goal_amount),
        market_value: market_value_total,
        market_delta: delta.delta,
        market_delta_pct: delta.delta_pct,
        concentration_by_asset: concentration_assets,
        concentration_by_type: concentration_types,
        alerts: alert_messages(&alerts),
        latest_quote_date: idx.latest_quote_date(),
        top_gainers,
        top_losers,
        rows,
    }
}

fn analysis_row(
    asset: &Asset,
    idx: &Indexed<'_>,
    latest_portfolio_month: Option<MonthKey>,
    stability_months: &[MonthKey],
) -> AnalysisRow {
    let invested = idx.invested(&asset.id);
    let monthly = idx.income_by_asset.get(&asset.id);
    let quote = idx.latest_quotes.get(asset.id.as_str()).copied();
    let fundamentals = idx.fundamentals.get(asset.id.as_str()).copied();

    let income_in_latest_month = latest_portfolio_month
        .and_then(|m| monthly.and_then(|by_month| by_month.get(&m)))
        .copied()
        .unwrap_or(0.0);
    let dy_monthly = if invested == 0.0 {
        0.0
    } else {
        income_in_latest_month / invested
    };
    let dy_12m = idx.trailing_yield(&asset.id, invested);

    let empty = MonthlyIncome::new();
    let stability_values = fill_months(
        monthly.unwrap_or(&empty),
        stability_months.iter().copied(),
    );

    let income = income_score(dy_12m);
    let stability = stability_score(&stability_values);
    let risk = risk_score(&RiskInputs {
        vacancy_financial: fundamentals.and_then(|f| f.vacancy_financial),
        vacancy_physical: fundamentals.and_then(|f| f.vacancy_physical),
        debt_ratio: fundamentals.and_then(|f| f.debt_ratio),
        liquidity_daily: fundamentals
            .and_then(|f| f.liquidity_daily)
            .or_else(|| quote.and_then(|q| q.volume)),
    });
    let composite = composite_score(income, stability, risk);

    AnalysisRow {
        asset_id: asset.id.clone(),
        ticker: asset.ticker.clone(),
        asset_type: asset.asset_type,
        invested,
        valuation: idx.latest_valuations.get(asset.id.as_str()).map(|v| (*v).clone()),
        quote: quote.cloned(),
        fundamentals: fundamentals.cloned(),
        dy_monthly,
        dy_12m,
        income_score: income,
        stability_score: stability,
        risk_score: risk,
        composite_score: composite,
        signal: Signal::from_score(composite),
    }
}

fn matches_filter(row: &AnalysisRow, filter: AnalysisFilter, vacancy_threshold: f64) -> bool {
    match filter {
        AnalysisFilter::All => true,
        AnalysisFilter::Opportunity => row
            .composite_score
            .is_some_and(|s| s >= OPPORTUNITY_SIGNAL_MIN),
        AnalysisFilter::Risk => row.composite_score.is_some_and(|s| s <= RISK_SIGNAL_MAX),
        AnalysisFilter::Income => row.income_score.is_some_and(|s| s >= OPPORTUNITY_SIGNAL_MIN),
        AnalysisFilter::Stable => row
            .stability_score
            .is_some_and(|s| s >= OPPORTUNITY_SIGNAL_MIN),
        AnalysisFilter::Vacancy => row
            .fundamentals
            .as_ref()
            .and_then(|f| f.vacancy())
            .is_some_and(|v| v >= vacancy_threshold),
        AnalysisFilter::NoData => row.composite_score.is_none(),
    }
}

pub fn build_analysis(
    snapshot: &PortfolioSnapshot,
    filter: AnalysisFilter,
    reference: NaiveDate,
) -> AnalysisReport {
    let idx = Indexed::new(snapshot);
    let latest_portfolio_month = snapshot.incomes.iter().map(|i| i.month).max();
    let stability_months: Vec<MonthKey> =
        recent_month_keys(STABILITY_WINDOW_MONTHS, reference).collect();
    let vacancy_threshold = snapshot.settings.thresholds().vacancy_pct;

    let rows = snapshot
        .assets
        .iter()
        .map(|a| analysis_row(a, &idx, latest_portfolio_month, &stability_months))
        .filter(|row| matches_filter(row, filter, vacancy_threshold))
        .collect();

    AnalysisReport {
        filter,
        latest_quote_date: idx.latest_quote_date(),
        rows,
    }
}

pub fn build_market_rows(snapshot: &PortfolioSnapshot) -> Vec<MarketRow> {
    let latest = latest_catalog_quotes_by_entry(&snapshot.catalog_quotes);
    snapshot
        .catalog
        .iter()
        .map(|entry| {
            let quote = latest.get(entry.id.as_str()).copied();
            MarketRow {
                entry: entry.clone(),
                quote: quote.cloned(),
                position_52w: quote.and_then(|q| q.position_52w()),
            }
        })
        .collect()
}
