//! Quote reconciliation.
//!
//! Fetches one quote per distinct ticker across every user's held assets and
//! reference catalog, then writes three batches in order:
//!
//! 1. held-asset quotes, upserted on `(user_id, asset_id, date)`
//! 2. catalog quotes, upserted on `(user_id, catalog_id, date)`
//! 3. valuation snapshots, inserted only for `(asset_id, date)` pairs that
//!    have no valuation yet
//!
//! A failed fetch skips that ticker. A failed write aborts the remaining
//! batches; batches already written stay. The valuation pre-check is a
//! read-then-write and is not atomic against a concurrent run.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use futures::stream::{self, StreamExt};
use log::{debug, info, warn};

use fiifolio_market_data::{MarketDataProvider, Quote};

use super::model::{NewCatalogQuote, NewMarketQuote, ReconciliationSummary};
use super::store::{CatalogQuoteRepositoryTrait, MarketQuoteRepositoryTrait};
use crate::assets::{normalize_ticker, AssetCatalogRepositoryTrait, AssetRepositoryTrait};
use crate::constants::QUOTE_SOURCE_BRAPI;
use crate::errors::Result;
use crate::utils::today_utc;
use crate::valuations::{resolve_price_to_book, NewValuation, ValuationRepositoryTrait};

#[async_trait]
pub trait QuoteReconciliationServiceTrait: Send + Sync {
    /// Runs a reconciliation dated on the process clock.
    async fn reconcile(&self) -> Result<ReconciliationSummary>;
}

/// A fetched quote with its resolved trading date.
#[derive(Debug, Clone)]
struct DatedQuote {
    quote: Quote,
    date: NaiveDate,
}

pub struct QuoteReconciliationService {
    provider: Arc<dyn MarketDataProvider>,
    asset_repository: Arc<dyn AssetRepositoryTrait>,
    catalog_repository: Arc<dyn AssetCatalogRepositoryTrait>,
    market_quote_repository: Arc<dyn MarketQuoteRepositoryTrait>,
    catalog_quote_repository: Arc<dyn CatalogQuoteRepositoryTrait>,
    valuation_repository: Arc<dyn ValuationRepositoryTrait>,
    max_concurrency: usize,
}

impl QuoteReconciliationService {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        asset_repository: Arc<dyn AssetRepositoryTrait>,
        catalog_repository: Arc<dyn AssetCatalogRepositoryTrait>,
        market_quote_repository: Arc<dyn MarketQuoteRepositoryTrait>,
        catalog_quote_repository: Arc<dyn CatalogQuoteRepositoryTrait>,
        valuation_repository: Arc<dyn ValuationRepositoryTrait>,
    ) -> Self {
        Self {
            provider,
            asset_repository,
            catalog_repository,
            market_quote_repository,
            catalog_quote_repository,
            valuation_repository,
            max_concurrency: 1,
        }
    }

    /// Number of fetches in flight at once, capped by the provider's limit.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    fn effective_concurrency(&self) -> usize {
        self.max_concurrency
            .min(self.provider.rate_limit().max_concurrency)
            .max(1)
    }

    /// Runs a reconciliation, using `today` when a quote carries no usable
    /// trading time.
    pub async fn reconcile_on(&self, today: NaiveDate) -> Result<ReconciliationSummary> {
        let assets = self.asset_repository.list_all()?;
        let catalog = self.catalog_repository.list_all()?;

        let tickers: BTreeSet<String> = assets
            .iter()
            .map(|a| normalize_ticker(&a.ticker))
            .chain(catalog.iter().map(|c| normalize_ticker(&c.ticker)))
            .filter(|t| !t.is_empty())
            .collect();

        if tickers.is_empty() {
            info!("Quote reconciliation skipped: no assets found");
            return Ok(ReconciliationSummary::nothing_to_do("No assets found"));
        }

        let quotes = self.fetch_quotes(tickers, today).await;
        if quotes.is_empty() {
            info!("Quote reconciliation collected no quotes");
            return Ok(ReconciliationSummary::nothing_to_do("No quotes collected"));
        }

        let held_rows: Vec<NewMarketQuote> = assets
            .iter()
            .filter_map(|asset| {
                let dated = quotes.get(&normalize_ticker(&asset.ticker))?;
                Some(NewMarketQuote {
                    user_id: asset.user_id.clone(),
                    asset_id: asset.id.clone(),
                    date: dated.date,
                    price: Some(dated.quote.price),
                    change: dated.quote.change,
                    change_percent: dated.quote.change_percent,
                    volume: dated.quote.volume,
                    week_52_high: dated.quote.week_52_high,
                    week_52_low: dated.quote.week_52_low,
                    source: Some(QUOTE_SOURCE_BRAPI.to_string()),
                })
            })
            .collect();

        let catalog_rows: Vec<NewCatalogQuote> = catalog
            .iter()
            .filter_map(|entry| {
                let dated = quotes.get(&normalize_ticker(&entry.ticker))?;
                Some(NewCatalogQuote {
                    user_id: entry.user_id.clone(),
                    catalog_id: entry.id.clone(),
                    date: dated.date,
                    price: Some(dated.quote.price),
                    change: dated.quote.change,
                    change_percent: dated.quote.change_percent,
                    volume: dated.quote.volume,
                    week_52_high: dated.quote.week_52_high,
                    week_52_low: dated.quote.week_52_low,
                    source: Some(QUOTE_SOURCE_BRAPI.to_string()),
                })
            })
            .collect();

        let valuation_candidates: Vec<NewValuation> = assets
            .iter()
            .filter_map(|asset| {
                let dated = quotes.get(&normalize_ticker(&asset.ticker))?;
                Some(valuation_candidate(&asset.user_id, &asset.id, dated))
            })
            .collect();

        let updated_assets = if held_rows.is_empty() {
            0
        } else {
            self.market_quote_repository.upsert_many(held_rows).await?
        };
        debug!("Upserted {} held-asset quotes", updated_assets);

        let updated_catalog = if catalog_rows.is_empty() {
            0
        } else {
            self.catalog_quote_repository
                .upsert_many(catalog_rows)
                .await?
        };
        debug!("Upserted {} catalog quotes", updated_catalog);

        let updated_valuations = self.insert_new_valuations(valuation_candidates).await?;
        debug!("Inserted {} valuations", updated_valuations);

        let summary = ReconciliationSummary {
            updated_assets,
            updated_catalog,
            updated_valuations,
            tickers: quotes.len(),
            message: None,
        };
        info!(
            "Quote reconciliation finished: {} tickers, {} asset quotes, {} catalog quotes, {} valuations",
            summary.tickers, summary.updated_assets, summary.updated_catalog, summary.updated_valuations
        );
        Ok(summary)
    }

    /// Fetches every ticker with bounded concurrency. Failures are logged and
    /// dropped.
    async fn fetch_quotes(
        &self,
        tickers: BTreeSet<String>,
        today: NaiveDate,
    ) -> HashMap<String, DatedQuote> {
        let concurrency = self.effective_concurrency();
        debug!(
            "Fetching {} tickers from {} with concurrency {}",
            tickers.len(),
            self.provider.id(),
            concurrency
        );

        let results: Vec<_> = stream::iter(tickers)
            .map(|ticker| {
                let provider = Arc::clone(&self.provider);
                async move {
                    let result = provider.get_latest_quote(&ticker).await;
                    (ticker, result)
                }
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        results
            .into_iter()
            .filter_map(|(ticker, result)| match result {
                Ok(quote) if quote.price.is_finite() && quote.price > 0.0 => {
                    let date = resolve_quote_date(quote.market_time.as_deref(), today);
                    Some((ticker, DatedQuote { quote, date }))
                }
                Ok(_) => {
                    warn!("Skipping {}: quote has no usable price", ticker);
                    None
                }
                Err(e) => {
                    warn!("Failed to fetch quote for {}: {}", ticker, e);
                    None
                }
            })
            .collect()
    }

    /// Drops candidates whose `(asset_id, date)` already has a valuation,
    /// then inserts the rest.
    async fn insert_new_valuations(&self, candidates: Vec<NewValuation>) -> Result<usize> {
        let mut seen = HashSet::new();
        let candidates: Vec<NewValuation> = candidates
            .into_iter()
            .filter(|v| match v.date {
                Some(date) => seen.insert((v.asset_id.clone(), date)),
                None => false,
            })
            .collect();
        if candidates.is_empty() {
            return Ok(0);
        }

        let keys: Vec<(String, NaiveDate)> = seen.into_iter().collect();
        let existing: HashSet<(String, NaiveDate)> = self
            .valuation_repository
            .find_existing(&keys)?
            .into_iter()
            .collect();

        let fresh: Vec<NewValuation> = candidates
            .into_iter()
            .filter(|v| {
                v.date
                    .map(|date| !existing.contains(&(v.asset_id.clone(), date)))
                    .unwrap_or(false)
            })
            .collect();

        if fresh.is_empty() {
            return Ok(0);
        }
        self.valuation_repository.insert_many(fresh).await
    }
}

#[async_trait]
impl QuoteReconciliationServiceTrait for QuoteReconciliationService {
    async fn reconcile(&self) -> Result<ReconciliationSummary> {
        self.reconcile_on(today_utc()).await
    }
}

/// A price snapshot for a held asset. Book data is carried when the quote has it.
fn valuation_candidate(user_id: &str, asset_id: &str, dated: &DatedQuote) -> NewValuation {
    let quote = &dated.quote;
    let book_value = quote.book_value_per_share.filter(|v| v.is_finite());
    let price_to_book = resolve_price_to_book(quote.price_to_book, Some(quote.price), book_value);
    NewValuation {
        user_id: user_id.to_string(),
        asset_id: asset_id.to_string(),
        date: Some(dated.date),
        price: Some(quote.price),
        book_value_per_share: book_value,
        price_to_book,
        source: Some(QUOTE_SOURCE_BRAPI.to_string()),
    }
}

/// Calendar date (UTC) of the provider's trading timestamp, or `today` when
/// the timestamp is absent or unparseable.
pub fn resolve_quote_date(raw: Option<&str>, today: NaiveDate) -> NaiveDate {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return today;
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return dt.with_timezone(&Utc).date_naive();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.date();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return dt.date();
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap_or(today)
}
