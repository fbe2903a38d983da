use std::sync::Arc;

use chrono::NaiveDate;

use super::insights_builder::{build_analysis, build_dashboard, build_market_rows, PortfolioSnapshot};
use super::insights_model::{AnalysisFilter, AnalysisReport, DashboardSummary, MarketRow};
use crate::assets::{AssetCatalogRepositoryTrait, AssetRepositoryTrait};
use crate::errors::Result;
use crate::fundamentals::FundamentalsRepositoryTrait;
use crate::incomes::IncomeRepositoryTrait;
use crate::positions::PositionRepositoryTrait;
use crate::quotes::{CatalogQuoteRepositoryTrait, MarketQuoteRepositoryTrait};
use crate::settings::{Settings, SettingsRepositoryTrait};
use crate::valuations::ValuationRepositoryTrait;

/// Read-only views derived from a user's records.
pub trait InsightsServiceTrait: Send + Sync {
    /// Dashboard, with calendar windows ending at `reference`.
    fn get_dashboard(&self, user_id: &str, reference: NaiveDate) -> Result<DashboardSummary>;

    fn get_analysis(
        &self,
        user_id: &str,
        filter: AnalysisFilter,
        reference: NaiveDate,
    ) -> Result<AnalysisReport>;

    fn get_market(&self, user_id: &str) -> Result<Vec<MarketRow>>;
}

/// Repositories read by [`InsightsService`].
#[derive(Clone)]
pub struct InsightsRepositories {
    pub assets: Arc<dyn AssetRepositoryTrait>,
    pub positions: Arc<dyn PositionRepositoryTrait>,
    pub incomes: Arc<dyn IncomeRepositoryTrait>,
    pub valuations: Arc<dyn ValuationRepositoryTrait>,
    pub fundamentals: Arc<dyn FundamentalsRepositoryTrait>,
    pub market_quotes: Arc<dyn MarketQuoteRepositoryTrait>,
    pub catalog: Arc<dyn AssetCatalogRepositoryTrait>,
    pub catalog_quotes: Arc<dyn CatalogQuoteRepositoryTrait>,
    pub settings: Arc<dyn SettingsRepositoryTrait>,
}

pub struct InsightsService {
    repos: InsightsRepositories,
}

impl InsightsService {
    pub fn new(repos: InsightsRepositories) -> Self {
        Self { repos }
    }

    fn load_settings(&self, user_id: &str) -> Result<Settings> {
        Ok(self
            .repos
            .settings
            .get_settings(user_id)?
            .unwrap_or_else(|| Settings {
                user_id: user_id.to_string(),
                ..Default::default()
            }))
    }

    /// Loads every record the portfolio views need.
    fn load_portfolio(&self, user_id: &str) -> Result<PortfolioSnapshot> {
        Ok(PortfolioSnapshot {
            assets: self.repos.assets.list(user_id)?,
            positions: self.repos.positions.list(user_id)?,
            incomes: self.repos.incomes.list(user_id)?,
            valuations: self.repos.valuations.list(user_id)?,
            fundamentals: self.repos.fundamentals.list(user_id)?,
            quotes: self.repos.market_quotes.list(user_id)?,
            settings: self.load_settings(user_id)?,
            ..Default::default()
        })
    }
}

impl InsightsServiceTrait for InsightsService {
    fn get_dashboard(&self, user_id: &str, reference: NaiveDate) -> Result<DashboardSummary> {
        let snapshot = self.load_portfolio(user_id)?;
        Ok(build_dashboard(&snapshot, reference))
    }

    fn get_analysis(
        &self,
        user_id: &str,
        filter: AnalysisFilter,
        reference: NaiveDate,
    ) -> Result<AnalysisReport> {
        let snapshot = self.load_portfolio(user_id)?;
        Ok(build_analysis(&snapshot, filter, reference))
    }

    fn get_market(&self, user_id: &str) -> Result<Vec<MarketRow>> {
        let snapshot = PortfolioSnapshot {
            catalog: self.repos.catalog.list(user_id)?,
            catalog_quotes: self.repos.catalog_quotes.list(user_id)?,
            ..Default::default()
        };
        Ok(build_market_rows(&snapshot))
    }
}
