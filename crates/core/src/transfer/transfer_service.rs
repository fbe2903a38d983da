use log::{info, warn};
use std::sync::Arc;

use crate::assets::AssetServiceTrait;
use crate::errors::Result;
use crate::incomes::IncomeServiceTrait;
use crate::positions::PositionServiceTrait;
use crate::utils::csv_io::{self, CsvEntity, ImportReport, ParsedRows};

#[async_trait::async_trait]
pub trait TransferServiceTrait: Send + Sync {
    fn export_csv(&self, user_id: &str, entity: CsvEntity) -> Result<String>;
    async fn import_csv(
        &self,
        user_id: &str,
        entity: CsvEntity,
        content: &str,
    ) -> Result<ImportReport>;
}

/// CSV export and import through the record services, so imported rows get
/// the same validation as manual edits.
pub struct TransferService {
    asset_service: Arc<dyn AssetServiceTrait>,
    position_service: Arc<dyn PositionServiceTrait>,
    income_service: Arc<dyn IncomeServiceTrait>,
}

impl TransferService {
    pub fn new(
        asset_service: Arc<dyn AssetServiceTrait>,
        position_service: Arc<dyn PositionServiceTrait>,
        income_service: Arc<dyn IncomeServiceTrait>,
    ) -> Self {
        Self {
            asset_service,
            position_service,
            income_service,
        }
    }
}

/// Starts a report from the rows the parser already rejected.
fn report_for<T>(parsed: &ParsedRows<T>) -> ImportReport {
    ImportReport {
        imported: 0,
        skipped: parsed.skipped,
    }
}

fn tally<T>(report: &mut ImportReport, entity: CsvEntity, result: Result<T>) {
    match result {
        Ok(_) => report.imported += 1,
        Err(e) => {
            warn!("Skipping {} row: {}", entity, e);
            report.skipped += 1;
        }
    }
}

#[async_trait::async_trait]
impl TransferServiceTrait for TransferService {
    fn export_csv(&self, user_id: &str, entity: CsvEntity) -> Result<String> {
        match entity {
            CsvEntity::Assets => csv_io::export_assets(&self.asset_service.get_assets(user_id)?),
            CsvEntity::Positions => csv_io::export_positions(
                &self.position_service.get_positions(user_id)?,
                &self.asset_service.get_assets(user_id)?,
            ),
            CsvEntity::Incomes => csv_io::export_incomes(
                &self.income_service.get_incomes(user_id)?,
                &self.asset_service.get_assets(user_id)?,
            ),
            CsvEntity::Catalog => csv_io::export_catalog(&self.asset_service.get_catalog(user_id)?),
        }
    }

    async fn import_csv(
        &self,
        user_id: &str,
        entity: CsvEntity,
        content: &str,
    ) -> Result<ImportReport> {
        let report = match entity {
            CsvEntity::Assets => {
                let parsed = csv_io::parse_assets(content, user_id)?;
                let mut report = report_for(&parsed);
                for row in parsed.rows {
                    tally(&mut report, entity, self.asset_service.save_asset(row).await);
                }
                report
            }
            CsvEntity::Catalog => {
                let parsed = csv_io::parse_catalog(content, user_id)?;
                let mut report = report_for(&parsed);
                for row in parsed.rows {
                    tally(
                        &mut report,
                        entity,
                        self.asset_service.save_catalog_entry(row).await,
                    );
                }
                report
            }
            CsvEntity::Positions => {
                let assets = self.asset_service.get_assets(user_id)?;
                let parsed = csv_io::parse_positions(content, user_id, &assets)?;
                let mut report = report_for(&parsed);
                for row in parsed.rows {
                    tally(
                        &mut report,
                        entity,
                        self.position_service.save_position(row).await,
                    );
                }
                report
            }
            CsvEntity::Incomes => {
                let assets = self.asset_service.get_assets(user_id)?;
                let parsed = csv_io::parse_incomes(content, user_id, &assets)?;
                let mut report = report_for(&parsed);
                for row in parsed.rows {
                    tally(&mut report, entity, self.income_service.save_income(row).await);
                }
                report
            }
        };
        info!(
            "Imported {} {} rows for user {} ({} skipped)",
            report.imported, entity, user_id, report.skipped
        );
        Ok(report)
    }
}
