//! Portfolio-level value and concentration metrics.

use std::collections::{BTreeMap, HashMap};

use crate::assets::{Asset, AssetType};
use crate::positions::Position;

/// Σ `quantity × avg_price + costs`
pub fn invested_value(positions: &[Position]) -> f64 {
    positions.iter().map(Position::invested_value).sum()
}

/// Share of total invested value per asset id. Empty when nothing is
/// invested.
pub fn concentration_by_asset(positions: &[Position]) -> BTreeMap<String, f64> {
    let total = invested_value(positions);
    if total == 0.0 || !total.is_finite() {
        return BTreeMap::new();
    }
    positions.iter().fold(BTreeMap::new(), |mut acc, p| {
        *acc.entry(p.asset_id.clone()).or_insert(0.0) += p.invested_value() / total;
        acc
    })
}

/// Share of total invested value per asset type. Positions whose asset has
/// no type (or is unknown) count as [`AssetType::Other`].
pub fn concentration_by_type(positions: &[Position], assets: &[Asset]) -> BTreeMap<AssetType, f64> {
    let total = invested_value(positions);
    if total == 0.0 || !total.is_finite() {
        return BTreeMap::new();
    }
    let types: HashMap<&str, AssetType> = assets
        .iter()
        .map(|a| (a.id.as_str(), a.type_or_default()))
        .collect();
    positions.iter().fold(BTreeMap::new(), |mut acc, p| {
        let asset_type = types
            .get(p.asset_id.as_str())
            .copied()
            .unwrap_or_default();
        *acc.entry(asset_type).or_insert(0.0) += p.invested_value() / total;
        acc
    })
}

/// Largest single-asset share, or zero.
pub fn max_concentration(concentration: &BTreeMap<String, f64>) -> f64 {
    concentration.values().copied().fold(0.0, f64::max)
}

/// `(price − low) / (high − low)`, defined only when price and both bounds
/// are present and the bounds differ.
pub fn position_in_52_week_range(
    price: Option<f64>,
    week_52_low: Option<f64>,
    week_52_high: Option<f64>,
) -> Option<f64> {
    let (price, low, high) = (price?, week_52_low?, week_52_high?);
    if high == low || ![price, low, high].iter().all(|v| v.is_finite()) {
        return None;
    }
    Some((price - low) / (high - low))
}

/// `quantity × price` when a price is known.
pub fn market_value(quantity: f64, price: Option<f64>) -> Option<f64> {
    price.filter(|p| p.is_finite()).map(|p| quantity * p)
}

/// Unrealised gain of a market value over its cost.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MarketDelta {
    pub delta: f64,
    /// `delta / invested`, zero when nothing is invested.
    pub delta_pct: f64,
}

pub fn market_delta(market_value: f64, invested: f64) -> MarketDelta {
    let delta = market_value - invested;
    let delta_pct = if invested == 0.0 { 0.0 } else { delta / invested };
    MarketDelta { delta, delta_pct }
}

/// Per-asset gap `(market − invested) / invested`; `None` without a market
/// value or when nothing is invested.
pub fn price_gap(market_value: Option<f64>, invested: f64) -> Option<f64> {
    let market_value = market_value?;
    if invested == 0.0 {
        return None;
    }
    Some((market_value - invested) / invested)
}

/// Progress towards the investment goal, zero when the goal is zero.
pub fn goal_progress(invested: f64, goal_amount: f64) -> f64 {
    if goal_amount == 0.0 || !goal_amount.is_finite() {
        0.0
    } else {
        invested / goal_amount
    }
}
