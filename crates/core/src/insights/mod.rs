//! Insights module - dashboard, analysis and market views.

mod insights_builder;
mod insights_model;
mod insights_service;

#[cfg(test)]
mod insights_tests;

pub use insights_builder::{build_analysis, build_dashboard, build_market_rows, PortfolioSnapshot};
pub use insights_model::{
    AnalysisFilter, AnalysisReport, AnalysisRow, ConcentrationEntry, DashboardRow,
    DashboardSummary, MarketRow, MonthlyIncomePoint, Mover,
};
pub use insights_service::{InsightsRepositories, InsightsService, InsightsServiceTrait};
