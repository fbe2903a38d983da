//! Month-level aggregation of income records.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::constants::TRAILING_YIELD_MONTHS;
use crate::incomes::Income;
use crate::utils::MonthKey;

/// Income totals keyed by month, iterated oldest first.
pub type MonthlyIncome = BTreeMap<MonthKey, f64>;

/// Sums income per month. Records sharing a month are added together.
pub fn group_by_month<'a, I>(incomes: I) -> MonthlyIncome
where
    I: IntoIterator<Item = &'a Income>,
{
    incomes
        .into_iter()
        .fold(MonthlyIncome::new(), |mut acc, income| {
            *acc.entry(income.month).or_insert(0.0) += income.effective_amount();
            acc
        })
}

/// Sums income per asset, then per month.
pub fn group_by_asset_and_month<'a, I>(incomes: I) -> HashMap<String, MonthlyIncome>
where
    I: IntoIterator<Item = &'a Income>,
{
    incomes
        .into_iter()
        .fold(HashMap::new(), |mut acc: HashMap<String, MonthlyIncome>, income| {
            *acc.entry(income.asset_id.clone())
                .or_default()
                .entry(income.month)
                .or_insert(0.0) += income.effective_amount();
            acc
        })
}

/// Mean of the last `window` months that have data. Months without records
/// are not counted. Zero when there is no data.
pub fn average_recent(monthly: &MonthlyIncome, window: usize) -> f64 {
    let values: Vec<f64> = monthly.values().rev().take(window).copied().collect();
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// [`average_recent`] over raw income records.
pub fn average_income<'a, I>(incomes: I, window: usize) -> f64
where
    I: IntoIterator<Item = &'a Income>,
{
    average_recent(&group_by_month(incomes), window)
}

/// Income of the most recent month with data, if any.
pub fn latest_month(monthly: &MonthlyIncome) -> Option<(MonthKey, f64)> {
    monthly.iter().next_back().map(|(k, v)| (*k, *v))
}

/// Sum of up to the last twelve months with data divided by the invested
/// value. Zero when nothing is invested.
pub fn trailing_yield(monthly: &MonthlyIncome, invested_value: f64) -> f64 {
    if invested_value == 0.0 || !invested_value.is_finite() {
        return 0.0;
    }
    let income: f64 = monthly.values().rev().take(TRAILING_YIELD_MONTHS).sum();
    income / invested_value
}

/// Drop of the latest month against the mean of the `window` months before
/// it, or `None` when fewer than `window + 1` months exist or that mean is
/// zero.
pub fn checked_drop_ratio(monthly: &MonthlyIncome, window: usize) -> Option<f64> {
    if window == 0 || monthly.len() < window + 1 {
        return None;
    }
    let mut recent = monthly.values().rev();
    let latest = *recent.next()?;
    let prior_mean = recent.take(window).sum::<f64>() / window as f64;
    if prior_mean == 0.0 || !prior_mean.is_finite() {
        return None;
    }
    Some((prior_mean - latest) / prior_mean)
}

/// `(mean of prior window − latest) / mean of prior window`, or zero when
/// there is not enough data.
pub fn income_drop_ratio(monthly: &MonthlyIncome, window: usize) -> f64 {
    checked_drop_ratio(monthly, window).unwrap_or(0.0)
}

/// The `n` calendar months ending at the month of `reference`, oldest first.
pub fn recent_month_keys(n: usize, reference: NaiveDate) -> RecentMonthKeys {
    let last = MonthKey::from_date(reference);
    let first = (1..n).fold(last, |key, _| key.pred());
    RecentMonthKeys {
        next: first,
        remaining: n,
    }
}

/// Iterator returned by [`recent_month_keys`].
#[derive(Debug, Clone)]
pub struct RecentMonthKeys {
    next: MonthKey,
    remaining: usize,
}

impl Iterator for RecentMonthKeys {
    type Item = MonthKey;

    fn next(&mut self) -> Option<MonthKey> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.next = current.succ();
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RecentMonthKeys {}

/// Income for each of the given months, with gaps filled by zero.
pub fn fill_months<I>(monthly: &MonthlyIncome, months: I) -> Vec<f64>
where
    I: IntoIterator<Item = MonthKey>,
{
    months
        .into_iter()
        .map(|m| monthly.get(&m).copied().unwrap_or(0.0))
        .collect()
}
