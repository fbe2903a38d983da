//! Derivation engine: pure functions turning stored records into
//! aggregates, scores, portfolio metrics and alerts.

pub mod alerts;
pub mod latest;
pub mod metrics;
pub mod scoring;
pub mod temporal;

pub use alerts::{alert_messages, evaluate_alerts, Alert, AlertInputs, AssetAlertInput};
pub use latest::{
    latest_by, latest_catalog_quotes_by_entry, latest_quotes_by_asset, latest_valuations_by_asset,
};
pub use metrics::{
    concentration_by_asset, concentration_by_type, goal_progress, invested_value, market_delta,
    market_value, max_concentration, position_in_52_week_range, price_gap, MarketDelta,
};
pub use scoring::{
    composite_score, income_score, opportunity_score, risk_score, stability_score,
    weighted_blend, OpportunityInputs, RiskInputs, Signal,
};
pub use temporal::{
    average_income, average_recent, checked_drop_ratio, fill_months, group_by_asset_and_month,
    group_by_month, income_drop_ratio, latest_month, recent_month_keys, trailing_yield,
    MonthlyIncome, RecentMonthKeys,
};
