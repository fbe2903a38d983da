//! In-memory repositories and a scripted quote provider for service tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use fiifolio_market_data::{MarketDataError, MarketDataProvider, Quote, RateLimit};

use crate::assets::{
    Asset, AssetCatalogRepositoryTrait, AssetRepositoryTrait, CatalogAsset, NewAsset,
    NewCatalogAsset,
};
use crate::errors::{Error, Result};
use crate::fundamentals::{Fundamentals, FundamentalsRepositoryTrait, NewFundamentals};
use crate::incomes::{Income, IncomeRepositoryTrait, NewIncome};
use crate::positions::{NewPosition, Position, PositionRepositoryTrait};
use crate::quotes::{
    CatalogQuote, CatalogQuoteRepositoryTrait, MarketQuote, MarketQuoteRepositoryTrait,
    NewCatalogQuote, NewMarketQuote,
};
use crate::settings::{Settings, SettingsRepositoryTrait};
use crate::valuations::{NewValuation, Valuation, ValuationRepositoryTrait};

#[derive(Default)]
pub struct InMemoryStore {
    next_id: AtomicUsize,
    pub assets: Mutex<Vec<Asset>>,
    pub catalog: Mutex<Vec<CatalogAsset>>,
    pub positions: Mutex<Vec<Position>>,
    pub incomes: Mutex<Vec<Income>>,
    pub valuations: Mutex<Vec<Valuation>>,
    pub fundamentals: Mutex<Vec<Fundamentals>>,
    pub settings: Mutex<Vec<Settings>>,
    pub market_quotes: Mutex<Vec<MarketQuote>>,
    pub catalog_quotes: Mutex<Vec<CatalogQuote>>,
    pub fail_market_quote_upsert: Mutex<bool>,
    pub fail_catalog_quote_upsert: Mutex<bool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn now() -> NaiveDateTime {
        Utc::now().naive_utc()
    }

    /// Adds an asset directly and returns its id.
    pub fn seed_asset(&self, user_id: &str, ticker: &str) -> String {
        let id = self.id("asset");
        self.assets.lock().unwrap().push(Asset {
            id: id.clone(),
            user_id: user_id.to_string(),
            ticker: ticker.to_string(),
            name: None,
            asset_type: None,
            sector: None,
            notes: None,
            status: None,
            created_at: Self::now(),
        });
        id
    }

    pub fn seed_catalog(&self, user_id: &str, ticker: &str) -> String {
        let id = self.id("catalog");
        self.catalog.lock().unwrap().push(CatalogAsset {
            id: id.clone(),
            user_id: user_id.to_string(),
            ticker: ticker.to_string(),
            name: None,
            asset_type: None,
            sector: None,
            created_at: Self::now(),
        });
        id
    }

    pub fn seed_position(&self, user_id: &str, asset_id: &str, quantity: f64, avg_price: f64) {
        self.positions.lock().unwrap().push(Position {
            id: self.id("position"),
            user_id: user_id.to_string(),
            asset_id: asset_id.to_string(),
            quantity,
            avg_price,
            costs: 0.0,
            start_date: None,
            created_at: Self::now(),
        });
    }

    pub fn seed_valuation(&self, user_id: &str, asset_id: &str, date: NaiveDate) {
        self.valuations.lock().unwrap().push(Valuation {
            id: self.id("valuation"),
            user_id: user_id.to_string(),
            asset_id: asset_id.to_string(),
            date: Some(date),
            price: Some(10.0),
            book_value_per_share: None,
            price_to_book: None,
            source: Some("manual".to_string()),
            created_at: Self::now(),
        });
    }
}

#[async_trait]
impl AssetRepositoryTrait for InMemoryStore {
    async fn upsert(&self, new_asset: NewAsset) -> Result<Asset> {
        let mut assets = self.assets.lock().unwrap();
        let existing = assets.iter_mut().find(|a| match &new_asset.id {
            Some(id) => &a.id == id,
            None => a.user_id == new_asset.user_id && a.ticker == new_asset.ticker,
        });
        if let Some(asset) = existing {
            asset.ticker = new_asset.ticker;
            asset.name = new_asset.name;
            asset.asset_type = new_asset.asset_type;
            asset.sector = new_asset.sector;
            asset.notes = new_asset.notes;
            asset.status = new_asset.status;
            return Ok(asset.clone());
        }
        let asset = Asset {
            id: new_asset.id.unwrap_or_else(|| self.id("asset")),
            user_id: new_asset.user_id,
            ticker: new_asset.ticker,
            name: new_asset.name,
            asset_type: new_asset.asset_type,
            sector: new_asset.sector,
            notes: new_asset.notes,
            status: new_asset.status,
            created_at: Self::now(),
        };
        assets.push(asset.clone());
        Ok(asset)
    }

    fn get_by_id(&self, user_id: &str, asset_id: &str) -> Result<Asset> {
        self.assets
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.user_id == user_id && a.id == asset_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Asset {}", asset_id)))
    }

    fn list(&self, user_id: &str) -> Result<Vec<Asset>> {
        Ok(self
            .assets
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    fn list_all(&self) -> Result<Vec<Asset>> {
        Ok(self.assets.lock().unwrap().clone())
    }

    async fn delete(&self, user_id: &str, asset_id: &str) -> Result<usize> {
        let mut assets = self.assets.lock().unwrap();
        let before = assets.len();
        assets.retain(|a| !(a.user_id == user_id && a.id == asset_id));
        let removed = before - assets.len();
        if removed > 0 {
            self.positions.lock().unwrap().retain(|p| p.asset_id != asset_id);
            self.incomes.lock().unwrap().retain(|i| i.asset_id != asset_id);
            self.valuations.lock().unwrap().retain(|v| v.asset_id != asset_id);
            self.fundamentals.lock().unwrap().retain(|f| f.asset_id != asset_id);
            self.market_quotes.lock().unwrap().retain(|q| q.asset_id != asset_id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl AssetCatalogRepositoryTrait for InMemoryStore {
    async fn upsert(&self, entry: NewCatalogAsset) -> Result<CatalogAsset> {
        let mut catalog = self.catalog.lock().unwrap();
        if let Some(existing) = catalog
            .iter_mut()
            .find(|c| c.user_id == entry.user_id && c.ticker == entry.ticker)
        {
            existing.name = entry.name;
            existing.asset_type = entry.asset_type;
            existing.sector = entry.sector;
            return Ok(existing.clone());
        }
        let created = CatalogAsset {
            id: entry.id.unwrap_or_else(|| self.id("catalog")),
            user_id: entry.user_id,
            ticker: entry.ticker,
            name: entry.name,
            asset_type: entry.asset_type,
            sector: entry.sector,
            created_at: Self::now(),
        };
        catalog.push(created.clone());
        Ok(created)
    }

    fn list(&self, user_id: &str) -> Result<Vec<CatalogAsset>> {
        Ok(self
            .catalog
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    fn list_all(&self) -> Result<Vec<CatalogAsset>> {
        Ok(self.catalog.lock().unwrap().clone())
    }

    async fn delete(&self, user_id: &str, catalog_id: &str) -> Result<usize> {
        let mut catalog = self.catalog.lock().unwrap();
        let before = catalog.len();
        catalog.retain(|c| !(c.user_id == user_id && c.id == catalog_id));
        Ok(before - catalog.len())
    }
}

#[async_trait]
impl PositionRepositoryTrait for InMemoryStore {
    async fn upsert(&self, new_position: NewPosition) -> Result<Position> {
        let mut positions = self.positions.lock().unwrap();
        positions.retain(|p| {
            !(p.user_id == new_position.user_id && p.asset_id == new_position.asset_id)
        });
        let position = Position {
            id: new_position.id.unwrap_or_else(|| self.id("position")),
            user_id: new_position.user_id,
            asset_id: new_position.asset_id,
            quantity: new_position.quantity,
            avg_price: new_position.avg_price,
            costs: new_position.costs.unwrap_or(0.0),
            start_date: new_position.start_date,
            created_at: Self::now(),
        };
        positions.push(position.clone());
        Ok(position)
    }

    fn list(&self, user_id: &str) -> Result<Vec<Position>> {
        Ok(self
            .positions
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    fn get_by_asset(&self, user_id: &str, asset_id: &str) -> Result<Option<Position>> {
        Ok(self
            .positions
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == user_id && p.asset_id == asset_id)
            .cloned())
    }
}

#[async_trait]
impl IncomeRepositoryTrait for InMemoryStore {
    async fn upsert(&self, new_income: NewIncome) -> Result<Income> {
        let mut incomes = self.incomes.lock().unwrap();
        incomes.retain(|i| {
            !(i.user_id == new_income.user_id
                && i.asset_id == new_income.asset_id
                && i.month == new_income.month)
        });
        let income = Income {
            id: new_income.id.unwrap_or_else(|| self.id("income")),
            user_id: new_income.user_id,
            asset_id: new_income.asset_id,
            month: new_income.month,
            amount: new_income.amount,
            amount_per_share: new_income.amount_per_share,
            created_at: Self::now(),
        };
        incomes.push(income.clone());
        Ok(income)
    }

    fn list(&self, user_id: &str) -> Result<Vec<Income>> {
        Ok(self
            .incomes
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, user_id: &str, income_id: &str) -> Result<usize> {
        let mut incomes = self.incomes.lock().unwrap();
        let before = incomes.len();
        incomes.retain(|i| !(i.user_id == user_id && i.id == income_id));
        Ok(before - incomes.len())
    }
}

impl InMemoryStore {
    fn to_valuation(&self, new_valuation: NewValuation) -> Valuation {
        Valuation {
            id: self.id("valuation"),
            user_id: new_valuation.user_id,
            asset_id: new_valuation.asset_id,
            date: new_valuation.date,
            price: new_valuation.price,
            book_value_per_share: new_valuation.book_value_per_share,
            price_to_book: new_valuation.price_to_book,
            source: new_valuation.source,
            created_at: Self::now(),
        }
    }
}

#[async_trait]
impl ValuationRepositoryTrait for InMemoryStore {
    async fn insert(&self, new_valuation: NewValuation) -> Result<Valuation> {
        let valuation = self.to_valuation(new_valuation);
        self.valuations.lock().unwrap().push(valuation.clone());
        Ok(valuation)
    }

    async fn insert_many(&self, new_valuations: Vec<NewValuation>) -> Result<usize> {
        let count = new_valuations.len();
        let rows: Vec<Valuation> = new_valuations
            .into_iter()
            .map(|v| self.to_valuation(v))
            .collect();
        self.valuations.lock().unwrap().extend(rows);
        Ok(count)
    }

    fn list(&self, user_id: &str) -> Result<Vec<Valuation>> {
        Ok(self
            .valuations
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.user_id == user_id)
            .cloned()
            .collect())
    }

    fn find_existing(&self, keys: &[(String, NaiveDate)]) -> Result<Vec<(String, NaiveDate)>> {
        let wanted: HashSet<&(String, NaiveDate)> = keys.iter().collect();
        let found: HashSet<(String, NaiveDate)> = self
            .valuations
            .lock()
            .unwrap()
            .iter()
            .filter_map(|v| Some((v.asset_id.clone(), v.date?)))
            .filter(|k| wanted.contains(k))
            .collect();
        Ok(found.into_iter().collect())
    }
}

#[async_trait]
impl FundamentalsRepositoryTrait for InMemoryStore {
    async fn upsert(&self, new_fundamentals: NewFundamentals) -> Result<Fundamentals> {
        let mut all = self.fundamentals.lock().unwrap();
        all.retain(|f| {
            !(f.user_id == new_fundamentals.user_id && f.asset_id == new_fundamentals.asset_id)
        });
        let fundamentals = Fundamentals {
            id: self.id("fundamentals"),
            user_id: new_fundamentals.user_id,
            asset_id: new_fundamentals.asset_id,
            vacancy_physical: new_fundamentals.vacancy_physical,
            vacancy_financial: new_fundamentals.vacancy_financial,
            wault_years: new_fundamentals.wault_years,
            debt_ratio: new_fundamentals.debt_ratio,
            liquidity_daily: new_fundamentals.liquidity_daily,
            notes: new_fundamentals.notes,
            updated_at: Self::now(),
        };
        all.push(fundamentals.clone());
        Ok(fundamentals)
    }

    fn list(&self, user_id: &str) -> Result<Vec<Fundamentals>> {
        Ok(self
            .fundamentals
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SettingsRepositoryTrait for InMemoryStore {
    fn get_settings(&self, user_id: &str) -> Result<Option<Settings>> {
        Ok(self
            .settings
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.user_id == user_id)
            .cloned())
    }

    async fn save_settings(&self, settings: &Settings) -> Result<Settings> {
        let mut all = self.settings.lock().unwrap();
        all.retain(|s| s.user_id != settings.user_id);
        all.push(settings.clone());
        Ok(settings.clone())
    }
}

#[async_trait]
impl MarketQuoteRepositoryTrait for InMemoryStore {
    fn list(&self, user_id: &str) -> Result<Vec<MarketQuote>> {
        Ok(self
            .market_quotes
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn upsert_many(&self, quotes: Vec<NewMarketQuote>) -> Result<usize> {
        if *self.fail_market_quote_upsert.lock().unwrap() {
            return Err(Error::Repository("market_quotes unavailable".to_string()));
        }
        let count = quotes.len();
        let mut stored = self.market_quotes.lock().unwrap();
        for q in quotes {
            stored.retain(|s| {
                !(s.user_id == q.user_id && s.asset_id == q.asset_id && s.date == q.date)
            });
            stored.push(MarketQuote {
                id: self.id("quote"),
                user_id: q.user_id,
                asset_id: q.asset_id,
                date: q.date,
                price: q.price,
                change: q.change,
                change_percent: q.change_percent,
                volume: q.volume,
                week_52_high: q.week_52_high,
                week_52_low: q.week_52_low,
                source: q.source,
                created_at: Self::now(),
            });
        }
        Ok(count)
    }
}

#[async_trait]
impl CatalogQuoteRepositoryTrait for InMemoryStore {
    fn list(&self, user_id: &str) -> Result<Vec<CatalogQuote>> {
        Ok(self
            .catalog_quotes
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn upsert_many(&self, quotes: Vec<NewCatalogQuote>) -> Result<usize> {
        if *self.fail_catalog_quote_upsert.lock().unwrap() {
            return Err(Error::Repository("market_catalog_quotes unavailable".to_string()));
        }
        let count = quotes.len();
        let mut stored = self.catalog_quotes.lock().unwrap();
        for q in quotes {
            stored.retain(|s| {
                !(s.user_id == q.user_id && s.catalog_id == q.catalog_id && s.date == q.date)
            });
            stored.push(CatalogQuote {
                id: self.id("catalog-quote"),
                user_id: q.user_id,
                catalog_id: q.catalog_id,
                date: q.date,
                price: q.price,
                change: q.change,
                change_percent: q.change_percent,
                volume: q.volume,
                week_52_high: q.week_52_high,
                week_52_low: q.week_52_low,
                source: q.source,
                created_at: Self::now(),
            });
        }
        Ok(count)
    }
}

/// Provider answering from a fixed table. Tickers listed in `failing` return
/// a provider error; unknown tickers are not found.
#[derive(Default)]
pub struct ScriptedProvider {
    pub quotes: HashMap<String, Quote>,
    pub failing: HashSet<String>,
    pub requested: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn with_quote(mut self, quote: Quote) -> Self {
        self.quotes.insert(quote.symbol.clone(), quote);
        self
    }

    pub fn with_failure(mut self, ticker: &str) -> Self {
        self.failing.insert(ticker.to_string());
        self
    }
}

#[async_trait]
impl MarketDataProvider for ScriptedProvider {
    fn id(&self) -> &'static str {
        "SCRIPTED"
    }

    fn rate_limit(&self) -> RateLimit {
        RateLimit {
            max_concurrency: 4,
            min_delay: Duration::ZERO,
        }
    }

    async fn get_latest_quote(&self, ticker: &str) -> std::result::Result<Quote, MarketDataError> {
        self.requested.lock().unwrap().push(ticker.to_string());
        if self.failing.contains(ticker) {
            return Err(MarketDataError::ProviderError {
                provider: "SCRIPTED".to_string(),
                message: "HTTP 500".to_string(),
            });
        }
        self.quotes
            .get(ticker)
            .cloned()
            .ok_or_else(|| MarketDataError::SymbolNotFound(ticker.to_string()))
    }
}
