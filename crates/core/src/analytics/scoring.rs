//! 0–100 scores. `None` means there was not enough data to score, which is
//! distinct from a score of zero.

use serde::{Deserialize, Serialize};

use crate::constants::{
    LIQUIDITY_REFERENCE, OPPORTUNITY_SIGNAL_MIN, PRICE_TO_BOOK_DECAY_SPAN, RISK_SIGNAL_MAX,
    TARGET_ANNUAL_YIELD,
};

const RISK_VACANCY_WEIGHT: f64 = 0.4;
const RISK_DEBT_WEIGHT: f64 = 0.3;
const RISK_LIQUIDITY_WEIGHT: f64 = 0.3;

const OPPORTUNITY_YIELD_WEIGHT: f64 = 0.4;
const OPPORTUNITY_PRICE_TO_BOOK_WEIGHT: f64 = 0.3;
const OPPORTUNITY_RANGE_WEIGHT: f64 = 0.3;

const COMPOSITE_INCOME_WEIGHT: f64 = 0.4;
const COMPOSITE_STABILITY_WEIGHT: f64 = 0.3;
const COMPOSITE_RISK_WEIGHT: f64 = 0.3;

/// Converts a fraction to a score, clamping to `[0, 1]` first.
/// Rounds half away from zero.
fn to_score(fraction: f64) -> u8 {
    (fraction.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Weighted mean over the components that are present, with weights
/// renormalised over those components. `None` when none are present.
pub fn weighted_blend(components: &[(Option<f64>, f64)]) -> Option<f64> {
    let (sum, weight) = components
        .iter()
        .filter_map(|(value, weight)| value.filter(|v| v.is_finite()).map(|v| (v, *weight)))
        .fold((0.0, 0.0), |(sum, total), (v, w)| (sum + v * w, total + w));
    if weight == 0.0 {
        None
    } else {
        Some(sum / weight)
    }
}

/// Trailing yield against the 12% target.
///
/// `None` only when the yield is not a finite number.
pub fn income_score(trailing_yield: f64) -> Option<u8> {
    if !trailing_yield.is_finite() {
        return None;
    }
    Some(to_score(trailing_yield / TARGET_ANNUAL_YIELD))
}

/// `1 − coefficient of variation` of a fixed-width monthly series, using the
/// population standard deviation. A zero mean scores zero.
pub fn stability_score(values: &[f64]) -> Option<u8> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if mean <= 0.0 || !mean.is_finite() {
        return Some(0);
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let cv = variance.sqrt() / mean;
    Some(to_score(1.0 - cv))
}

/// Inputs to [`risk_score`]. Every field is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RiskInputs {
    pub vacancy_financial: Option<f64>,
    pub vacancy_physical: Option<f64>,
    pub debt_ratio: Option<f64>,
    /// Daily traded value. Callers fall back to quote volume.
    pub liquidity_daily: Option<f64>,
}

/// Blend of vacancy (0.4), debt (0.3) and liquidity (0.3) sub-scores.
/// Higher is safer.
pub fn risk_score(inputs: &RiskInputs) -> Option<u8> {
    let vacancy = inputs.vacancy_financial.or(inputs.vacancy_physical);
    let components = [
        (vacancy.map(|v| (1.0 - v).max(0.0)), RISK_VACANCY_WEIGHT),
        (
            inputs.debt_ratio.map(|d| (1.0 - d).max(0.0)),
            RISK_DEBT_WEIGHT,
        ),
        (
            inputs
                .liquidity_daily
                .map(|l| (l / LIQUIDITY_REFERENCE).clamp(0.0, 1.0)),
            RISK_LIQUIDITY_WEIGHT,
        ),
    ];
    weighted_blend(&components).map(to_score)
}

/// Inputs to [`opportunity_score`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OpportunityInputs {
    pub trailing_yield: Option<f64>,
    /// Ignored when zero.
    pub price_to_book: Option<f64>,
    pub position_52w: Option<f64>,
}

/// Blend of yield (0.4), price-to-book (0.3) and 52-week position (0.3).
pub fn opportunity_score(inputs: &OpportunityInputs) -> Option<u8> {
    let price_to_book = inputs.price_to_book.filter(|p| *p != 0.0).map(|p| {
        if p <= 1.0 {
            1.0
        } else {
            (1.0 - (p - 1.0) / PRICE_TO_BOOK_DECAY_SPAN).max(0.0)
        }
    });
    let components = [
        (
            inputs
                .trailing_yield
                .map(|y| (y / TARGET_ANNUAL_YIELD).clamp(0.0, 1.0)),
            OPPORTUNITY_YIELD_WEIGHT,
        ),
        (price_to_book, OPPORTUNITY_PRICE_TO_BOOK_WEIGHT),
        (
            inputs.position_52w.map(|p| (1.0 - p).clamp(0.0, 1.0)),
            OPPORTUNITY_RANGE_WEIGHT,
        ),
    ];
    weighted_blend(&components).map(to_score)
}

/// Blend of income (0.4), stability (0.3) and risk (0.3) scores.
pub fn composite_score(income: Option<u8>, stability: Option<u8>, risk: Option<u8>) -> Option<u8> {
    let components = [
        (income.map(f64::from), COMPOSITE_INCOME_WEIGHT),
        (stability.map(f64::from), COMPOSITE_STABILITY_WEIGHT),
        (risk.map(f64::from), COMPOSITE_RISK_WEIGHT),
    ];
    weighted_blend(&components).map(|s| s.clamp(0.0, 100.0).round() as u8)
}

/// Classification of a composite or opportunity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    #[serde(rename = "opportunity")]
    Opportunity,
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "risk")]
    Risk,
    #[serde(rename = "no data")]
    NoData,
}

impl Signal {
    pub fn from_score(score: Option<u8>) -> Self {
        match score {
            None => Signal::NoData,
            Some(s) if s >= OPPORTUNITY_SIGNAL_MIN => Signal::Opportunity,
            Some(s) if s <= RISK_SIGNAL_MAX => Signal::Risk,
            Some(_) => Signal::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Opportunity => "opportunity",
            Signal::Neutral => "neutral",
            Signal::Risk => "risk",
            Signal::NoData => "no data",
        }
    }
}
