//! "Latest record per key" selection.

use std::collections::HashMap;
use std::hash::Hash;

use crate::quotes::{CatalogQuote, MarketQuote};
use crate::valuations::Valuation;

/// Keeps, per key, the item with the greatest rank. On equal rank the item
/// seen first wins.
pub fn latest_by<'a, T, K, R>(
    items: &'a [T],
    key: impl Fn(&'a T) -> K,
    rank: impl Fn(&'a T) -> R,
) -> HashMap<K, &'a T>
where
    K: Eq + Hash,
    R: Ord,
{
    items.iter().fold(HashMap::new(), |mut acc, item| {
        let k = key(item);
        let newer = acc
            .get(&k)
            .map_or(true, |current: &&'a T| rank(item) > rank(*current));
        if newer {
            acc.insert(k, item);
        }
        acc
    })
}

/// Latest valuation per asset by `(date or creation date, created_at)`.
pub fn latest_valuations_by_asset(valuations: &[Valuation]) -> HashMap<&str, &Valuation> {
    latest_by(valuations, |v| v.asset_id.as_str(), Valuation::recency_key)
}

/// Latest quote per asset by `(date, created_at)`.
pub fn latest_quotes_by_asset(quotes: &[MarketQuote]) -> HashMap<&str, &MarketQuote> {
    latest_by(quotes, |q| q.asset_id.as_str(), MarketQuote::recency_key)
}

/// Latest quote per catalog entry by `(date, created_at)`.
pub fn latest_catalog_quotes_by_entry(quotes: &[CatalogQuote]) -> HashMap<&str, &CatalogQuote> {
    latest_by(quotes, |q| q.catalog_id.as_str(), CatalogQuote::recency_key)
}
