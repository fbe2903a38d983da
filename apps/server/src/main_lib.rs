use std::sync::Arc;

use fiifolio_core::{
    assets::{AssetService, AssetServiceTrait},
    fundamentals::{FundamentalsService, FundamentalsServiceTrait},
    incomes::{IncomeService, IncomeServiceTrait},
    insights::{InsightsRepositories, InsightsService, InsightsServiceTrait},
    positions::{PositionService, PositionServiceTrait},
    quotes::{
        QuoteReconciliationService, QuoteReconciliationServiceTrait, QuoteService,
        QuoteServiceTrait,
    },
    settings::{SettingsService, SettingsServiceTrait},
    transfer::{TransferService, TransferServiceTrait},
    valuations::{ValuationService, ValuationServiceTrait},
};
use fiifolio_market_data::{BrapiProvider, MarketDataProvider};
use fiifolio_storage_sqlite::{
    assets::{AssetCatalogRepository, AssetRepository},
    db,
    fundamentals::FundamentalsRepository,
    incomes::IncomeRepository,
    positions::PositionRepository,
    quotes::{CatalogQuoteRepository, MarketQuoteRepository},
    settings::SettingsRepository,
    valuations::ValuationRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub asset_service: Arc<dyn AssetServiceTrait>,
    pub position_service: Arc<dyn PositionServiceTrait>,
    pub income_service: Arc<dyn IncomeServiceTrait>,
    pub valuation_service: Arc<dyn ValuationServiceTrait>,
    pub fundamentals_service: Arc<dyn FundamentalsServiceTrait>,
    pub settings_service: Arc<dyn SettingsServiceTrait>,
    pub quote_service: Arc<dyn QuoteServiceTrait>,
    pub insights_service: Arc<dyn InsightsServiceTrait>,
    pub transfer_service: Arc<dyn TransferServiceTrait>,
    pub reconciliation_service: Arc<dyn QuoteReconciliationServiceTrait>,
    pub db_path: String,
}

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Builds the state with the Brapi provider from the configuration.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider = Arc::new(BrapiProvider::new(
        config.brapi_base_url.clone(),
        config.brapi_token.clone(),
    ));
    build_state_with_provider(config, provider).await
}

pub async fn build_state_with_provider(
    config: &Config,
    provider: Arc<dyn MarketDataProvider>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer(pool.clone());

    let asset_repo = Arc::new(AssetRepository::new(pool.clone(), writer.clone()));
    let catalog_repo = Arc::new(AssetCatalogRepository::new(pool.clone(), writer.clone()));
    let position_repo = Arc::new(PositionRepository::new(pool.clone(), writer.clone()));
    let income_repo = Arc::new(IncomeRepository::new(pool.clone(), writer.clone()));
    let valuation_repo = Arc::new(ValuationRepository::new(pool.clone(), writer.clone()));
    let fundamentals_repo = Arc::new(FundamentalsRepository::new(pool.clone(), writer.clone()));
    let settings_repo = Arc::new(SettingsRepository::new(pool.clone(), writer.clone()));
    let market_quote_repo = Arc::new(MarketQuoteRepository::new(pool.clone(), writer.clone()));
    let catalog_quote_repo = Arc::new(CatalogQuoteRepository::new(pool.clone(), writer.clone()));

    let asset_service: Arc<dyn AssetServiceTrait> = Arc::new(AssetService::new(
        asset_repo.clone(),
        catalog_repo.clone(),
    ));
    let position_service: Arc<dyn PositionServiceTrait> = Arc::new(PositionService::new(
        position_repo.clone(),
        asset_repo.clone(),
    ));
    let income_service: Arc<dyn IncomeServiceTrait> = Arc::new(IncomeService::new(
        income_repo.clone(),
        asset_repo.clone(),
        position_repo.clone(),
    ));
    let valuation_service = Arc::new(ValuationService::new(
        valuation_repo.clone(),
        asset_repo.clone(),
    ));
    let fundamentals_service = Arc::new(FundamentalsService::new(
        fundamentals_repo.clone(),
        asset_repo.clone(),
    ));
    let settings_service = Arc::new(SettingsService::new(settings_repo.clone()));
    let quote_service = Arc::new(QuoteService::new(
        market_quote_repo.clone(),
        catalog_quote_repo.clone(),
    ));

    let insights_service = Arc::new(InsightsService::new(InsightsRepositories {
        assets: asset_repo.clone(),
        positions: position_repo.clone(),
        incomes: income_repo.clone(),
        valuations: valuation_repo.clone(),
        fundamentals: fundamentals_repo.clone(),
        market_quotes: market_quote_repo.clone(),
        catalog: catalog_repo.clone(),
        catalog_quotes: catalog_quote_repo.clone(),
        settings: settings_repo.clone(),
    }));

    let transfer_service = Arc::new(TransferService::new(
        asset_service.clone(),
        position_service.clone(),
        income_service.clone(),
    ));

    let reconciliation_service = Arc::new(
        QuoteReconciliationService::new(
            provider,
            asset_repo,
            catalog_repo,
            market_quote_repo,
            catalog_quote_repo,
            valuation_repo,
        )
        .with_max_concurrency(config.quote_max_concurrency),
    );

    Ok(Arc::new(AppState {
        asset_service,
        position_service,
        income_service,
        valuation_service,
        fundamentals_service,
        settings_service,
        quote_service,
        insights_service,
        transfer_service,
        reconciliation_service,
        db_path,
    }))
}
