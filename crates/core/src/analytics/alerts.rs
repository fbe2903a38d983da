//! Threshold-driven portfolio alerts.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::temporal::{checked_drop_ratio, income_drop_ratio, recent_month_keys, MonthlyIncome};
use crate::constants::{INCOME_DROP_WINDOW_MONTHS, MISSING_INCOME_WINDOW_MONTHS};
use crate::settings::AlertThresholds;
use crate::utils::MonthKey;

/// A single alert. Rendered to text with `Display`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Alert {
    HighConcentration { share: f64 },
    IncomeDrop { ratio: f64 },
    MissingIncome,
    HighVacancy { ticker: String, vacancy: f64 },
    AssetYieldDrop { ticker: String, ratio: f64 },
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alert::HighConcentration { share } => {
                write!(f, "High concentration: {} in a single asset.", percent(*share))
            }
            Alert::IncomeDrop { ratio } => write!(
                f,
                "Income drop: {} vs {}-month average.",
                percent(*ratio),
                INCOME_DROP_WINDOW_MONTHS
            ),
            Alert::MissingIncome => {
                f.write_str("Recent months without recorded income. Check for missing data.")
            }
            Alert::HighVacancy { ticker, vacancy } => {
                write!(f, "{}: vacancy {}", ticker, percent(*vacancy))
            }
            Alert::AssetYieldDrop { ticker, ratio } => {
                write!(f, "{}: DY drop {}", ticker, percent(*ratio))
            }
        }
    }
}

/// Per-asset data checked by the vacancy and yield-drop rules.
#[derive(Debug, Clone)]
pub struct AssetAlertInput<'a> {
    pub ticker: &'a str,
    /// Financial vacancy when known, else physical.
    pub vacancy: Option<f64>,
    pub monthly_income: Option<&'a MonthlyIncome>,
}

/// Aggregated metrics checked by [`evaluate_alerts`].
#[derive(Debug, Clone)]
pub struct AlertInputs<'a> {
    /// Largest single-asset share of invested value.
    pub max_asset_concentration: f64,
    pub portfolio_monthly_income: &'a MonthlyIncome,
    /// Months that have at least one income record.
    pub months_with_income: &'a BTreeSet<MonthKey>,
    pub reference_date: NaiveDate,
    pub assets: Vec<AssetAlertInput<'a>>,
    pub thresholds: AlertThresholds,
}

/// Evaluates every rule independently, in a fixed order: concentration,
/// portfolio income drop, missing income, vacancy per asset, yield drop per
/// asset.
pub fn evaluate_alerts(inputs: &AlertInputs<'_>) -> Vec<Alert> {
    let t = &inputs.thresholds;
    let mut alerts = Vec::new();

    if inputs.max_asset_concentration > t.max_asset_pct {
        alerts.push(Alert::HighConcentration {
            share: inputs.max_asset_concentration,
        });
    }

    let drop = income_drop_ratio(inputs.portfolio_monthly_income, INCOME_DROP_WINDOW_MONTHS);
    if drop > t.income_drop_pct {
        alerts.push(Alert::IncomeDrop { ratio: drop });
    }

    let missing = inputs.months_with_income.is_empty()
        || recent_month_keys(MISSING_INCOME_WINDOW_MONTHS, inputs.reference_date)
            .any(|m| !inputs.months_with_income.contains(&m));
    if missing {
        alerts.push(Alert::MissingIncome);
    }

    alerts.extend(inputs.assets.iter().filter_map(|a| {
        let vacancy = a.vacancy.filter(|v| *v >= t.vacancy_pct)?;
        Some(Alert::HighVacancy {
            ticker: a.ticker.to_string(),
            vacancy,
        })
    }));

    alerts.extend(inputs.assets.iter().filter_map(|a| {
        let ratio = checked_drop_ratio(a.monthly_income?, INCOME_DROP_WINDOW_MONTHS)?;
        (ratio >= t.asset_dy_drop_pct).then(|| Alert::AssetYieldDrop {
            ticker: a.ticker.to_string(),
            ratio,
        })
    }));

    alerts
}

/// Human-readable lines for a list of alerts.
pub fn alert_messages(alerts: &[Alert]) -> Vec<String> {
    alerts.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monthly(entries: &[(&str, f64)]) -> MonthlyIncome {
        entries
            .iter()
            .map(|(m, v)| (m.parse().unwrap(), *v))
            .collect()
    }

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn full_window() -> BTreeSet<MonthKey> {
        recent_month_keys(6, reference()).collect()
    }

    #[test]
    fn test_quiet_portfolio_has_no_alerts() {
        let income = monthly(&[
            ("2024-01", 100.0),
            ("2024-02", 100.0),
            ("2024-03", 100.0),
            ("2024-04", 100.0),
            ("2024-05", 100.0),
            ("2024-06", 100.0),
        ]);
        let months = full_window();
        let inputs = AlertInputs {
            max_asset_concentration: 0.2,
            portfolio_monthly_income: &income,
            months_with_income: &months,
            reference_date: reference(),
            assets: vec![AssetAlertInput {
                ticker: "HGLG11",
                vacancy: Some(0.1),
                monthly_income: Some(&income),
            }],
            thresholds: AlertThresholds::default(),
        };
        assert!(evaluate_alerts(&inputs).is_empty());
    }

    #[test]
    fn test_all_rules_fire_in_order() {
        let income = monthly(&[
            ("2024-02", 100.0),
            ("2024-03", 100.0),
            ("2024-04", 100.0),
            ("2024-05", 50.0),
        ]);
        let months: BTreeSet<MonthKey> = income.keys().copied().collect();
        let inputs = AlertInputs {
            max_asset_concentration: 0.35,
            portfolio_monthly_income: &income,
            months_with_income: &months,
            reference_date: reference(),
            assets: vec![
                AssetAlertInput {
                    ticker: "VACA11",
                    vacancy: Some(0.15),
                    monthly_income: None,
                },
                AssetAlertInput {
                    ticker: "DROP11",
                    vacancy: None,
                    monthly_income: Some(&income),
                },
            ],
            thresholds: AlertThresholds::default(),
        };
        let alerts = evaluate_alerts(&inputs);
        assert_eq!(
            alerts,
            vec![
                Alert::HighConcentration { share: 0.35 },
                Alert::IncomeDrop { ratio: 0.5 },
                Alert::MissingIncome,
                Alert::HighVacancy {
                    ticker: "VACA11".to_string(),
                    vacancy: 0.15
                },
                Alert::AssetYieldDrop {
                    ticker: "DROP11".to_string(),
                    ratio: 0.5
                },
            ]
        );
        let messages = alert_messages(&alerts);
        assert_eq!(messages[0], "High concentration: 35.0% in a single asset.");
        assert_eq!(messages[1], "Income drop: 50.0% vs 3-month average.");
        assert_eq!(messages[3], "VACA11: vacancy 15.0%");
        assert_eq!(messages[4], "DROP11: DY drop 50.0%");
    }

    #[test]
    fn test_concentration_at_threshold_does_not_fire() {
        let income = MonthlyIncome::new();
        let months = full_window();
        let inputs = AlertInputs {
            max_asset_concentration: 0.2,
            portfolio_monthly_income: &income,
            months_with_income: &months,
            reference_date: reference(),
            assets: vec![],
            thresholds: AlertThresholds::default(),
        };
        assert!(evaluate_alerts(&inputs).is_empty());
    }

    #[test]
    fn test_no_income_records_fires_missing_once() {
        let income = MonthlyIncome::new();
        let months = BTreeSet::new();
        let inputs = AlertInputs {
            max_asset_concentration: 0.0,
            portfolio_monthly_income: &income,
            months_with_income: &months,
            reference_date: reference(),
            assets: vec![],
            thresholds: AlertThresholds::default(),
        };
        assert_eq!(evaluate_alerts(&inputs), vec![Alert::MissingIncome]);
    }

    #[test]
    fn test_asset_drop_needs_four_months() {
        let income = monthly(&[("2024-04", 100.0), ("2024-05", 100.0), ("2024-06", 0.0)]);
        let months = full_window();
        let inputs = AlertInputs {
            max_asset_concentration: 0.0,
            portfolio_monthly_income: &income,
            months_with_income: &months,
            reference_date: reference(),
            assets: vec![AssetAlertInput {
                ticker: "NEW11",
                vacancy: None,
                monthly_income: Some(&income),
            }],
            thresholds: AlertThresholds {
                asset_dy_drop_pct: 0.0,
                ..AlertThresholds::default()
            },
        };
        assert!(evaluate_alerts(&inputs).is_empty());
    }
}
