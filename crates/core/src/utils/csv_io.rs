//! CSV export and import for assets, positions, incomes and the catalog.
//!
//! Import accepts `,` or `;` as the delimiter, trims headers and cells, and
//! reads numbers through [`parse_optional_number`]. Rows that reference an
//! unknown ticker or lack required values are counted as skipped.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::{Deserialize, Serialize};

use super::parse::parse_optional_number;
use super::time_utils::MonthKey;
use crate::assets::{normalize_ticker, Asset, CatalogAsset, NewAsset, NewCatalogAsset};
use crate::errors::{Error, Result};
use crate::incomes::{Income, NewIncome};
use crate::positions::{NewPosition, Position};

pub const ASSET_HEADERS: [&str; 6] = ["ticker", "name", "type", "sector", "status", "notes"];
pub const POSITION_HEADERS: [&str; 5] = ["ticker", "quantity", "avg_price", "costs", "start_date"];
pub const INCOME_HEADERS: [&str; 4] = ["ticker", "month", "amount", "amount_per_share"];
pub const CATALOG_HEADERS: [&str; 4] = ["ticker", "name", "type", "sector"];

/// Record kinds that can be exported and imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvEntity {
    Assets,
    Positions,
    Incomes,
    Catalog,
}

impl CsvEntity {
    pub fn as_str(&self) -> &'static str {
        match self {
            CsvEntity::Assets => "assets",
            CsvEntity::Positions => "positions",
            CsvEntity::Incomes => "incomes",
            CsvEntity::Catalog => "catalog",
        }
    }
}

impl fmt::Display for CsvEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CsvEntity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "assets" => Ok(CsvEntity::Assets),
            "positions" => Ok(CsvEntity::Positions),
            "incomes" => Ok(CsvEntity::Incomes),
            "catalog" => Ok(CsvEntity::Catalog),
            other => Err(Error::invalid(format!("Unknown CSV entity '{}'", other))),
        }
    }
}

/// Counts returned by an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

/// Rows parsed from an import file, plus how many were unusable.
#[derive(Debug, Clone)]
pub struct ParsedRows<T> {
    pub rows: Vec<T>,
    pub skipped: usize,
}

// ============================================================================
// Export
// ============================================================================

fn opt_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn write_csv<const N: usize>(headers: [&str; N], rows: Vec<[String; N]>) -> Result<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Csv(e.to_string()))
}

fn ticker_lookup(assets: &[Asset]) -> HashMap<&str, &str> {
    assets
        .iter()
        .map(|a| (a.id.as_str(), a.ticker.as_str()))
        .collect()
}

pub fn export_assets(assets: &[Asset]) -> Result<String> {
    let rows = assets
        .iter()
        .map(|a| {
            [
                a.ticker.clone(),
                a.name.clone().unwrap_or_default(),
                a.asset_type.map(|t| t.to_string()).unwrap_or_default(),
                a.sector.clone().unwrap_or_default(),
                a.status.map(|s| s.to_string()).unwrap_or_default(),
                a.notes.clone().unwrap_or_default(),
            ]
        })
        .collect();
    write_csv(ASSET_HEADERS, rows)
}

pub fn export_positions(positions: &[Position], assets: &[Asset]) -> Result<String> {
    let tickers = ticker_lookup(assets);
    let rows = positions
        .iter()
        .filter_map(|p| {
            let ticker = tickers.get(p.asset_id.as_str())?;
            Some([
                ticker.to_string(),
                p.quantity.to_string(),
                p.avg_price.to_string(),
                p.costs.to_string(),
                p.start_date.map(|d| d.to_string()).unwrap_or_default(),
            ])
        })
        .collect();
    write_csv(POSITION_HEADERS, rows)
}

pub fn export_incomes(incomes: &[Income], assets: &[Asset]) -> Result<String> {
    let tickers = ticker_lookup(assets);
    let rows = incomes
        .iter()
        .filter_map(|i| {
            let ticker = tickers.get(i.asset_id.as_str())?;
            Some([
                ticker.to_string(),
                i.month.to_string(),
                opt_number(i.amount),
                opt_number(i.amount_per_share),
            ])
        })
        .collect();
    write_csv(INCOME_HEADERS, rows)
}

pub fn export_catalog(catalog: &[CatalogAsset]) -> Result<String> {
    let rows = catalog
        .iter()
        .map(|c| {
            [
                c.ticker.clone(),
                c.name.clone().unwrap_or_default(),
                c.asset_type.map(|t| t.to_string()).unwrap_or_default(),
                c.sector.clone().unwrap_or_default(),
            ]
        })
        .collect();
    write_csv(CATALOG_HEADERS, rows)
}

// ============================================================================
// Import
// ============================================================================

/// One data row keyed by lower-cased header.
struct Row(HashMap<String, String>);

impl Row {
    fn text(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    fn owned(&self, key: &str) -> Option<String> {
        self.text(key).map(str::to_string)
    }

    fn number(&self, key: &str) -> Option<f64> {
        parse_optional_number(self.text(key))
    }

    fn ticker(&self) -> Option<String> {
        self.text("ticker")
            .map(normalize_ticker)
            .filter(|t| !t.is_empty())
    }
}

fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

/// `;` when the header line uses it and has no commas, else `,`.
fn detect_delimiter(content: &str) -> u8 {
    let header = content.lines().next().unwrap_or_default();
    if header.contains(';') && !header.contains(',') {
        b';'
    } else {
        b','
    }
}

fn read_rows(content: &str) -> Result<Vec<Row>> {
    let content = strip_bom(content).trim();
    if content.is_empty() {
        return Ok(Vec::new());
    }
    let mut reader = ReaderBuilder::new()
        .delimiter(detect_delimiter(content))
        .trim(Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        let map = headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();
        rows.push(Row(map));
    }
    Ok(rows)
}

fn parse_with<T>(content: &str, mut convert: impl FnMut(&Row) -> Option<T>) -> Result<ParsedRows<T>> {
    let rows = read_rows(content)?;
    let total = rows.len();
    let parsed: Vec<T> = rows.iter().filter_map(&mut convert).collect();
    Ok(ParsedRows {
        skipped: total - parsed.len(),
        rows: parsed,
    })
}

fn asset_id_by_ticker(assets: &[Asset]) -> HashMap<String, &str> {
    assets
        .iter()
        .map(|a| (normalize_ticker(&a.ticker), a.id.as_str()))
        .collect()
}

pub fn parse_assets(content: &str, user_id: &str) -> Result<ParsedRows<NewAsset>> {
    parse_with(content, |row| {
        Some(NewAsset {
            id: None,
            user_id: user_id.to_string(),
            ticker: row.ticker()?,
            name: row.owned("name"),
            asset_type: row.text("type").and_then(|t| t.parse().ok()),
            sector: row.owned("sector"),
            notes: row.owned("notes"),
            status: row.text("status").and_then(|s| s.parse().ok()),
        })
    })
}

pub fn parse_catalog(content: &str, user_id: &str) -> Result<ParsedRows<NewCatalogAsset>> {
    parse_with(content, |row| {
        Some(NewCatalogAsset {
            id: None,
            user_id: user_id.to_string(),
            ticker: row.ticker()?,
            name: row.owned("name"),
            asset_type: row.text("type").and_then(|t| t.parse().ok()),
            sector: row.owned("sector"),
        })
    })
}

pub fn parse_positions(
    content: &str,
    user_id: &str,
    assets: &[Asset],
) -> Result<ParsedRows<NewPosition>> {
    let ids = asset_id_by_ticker(assets);
    parse_with(content, |row| {
        let asset_id = ids.get(&row.ticker()?)?;
        Some(NewPosition {
            id: None,
            user_id: user_id.to_string(),
            asset_id: asset_id.to_string(),
            quantity: row.number("quantity")?,
            avg_price: row.number("avg_price")?,
            costs: row.number("costs"),
            start_date: row
                .text("start_date")
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
        })
    })
}

pub fn parse_incomes(
    content: &str,
    user_id: &str,
    assets: &[Asset],
) -> Result<ParsedRows<NewIncome>> {
    let ids = asset_id_by_ticker(assets);
    parse_with(content, |row| {
        let asset_id = ids.get(&row.ticker()?)?;
        let month: MonthKey = row.text("month")?.parse().ok()?;
        Some(NewIncome {
            id: None,
            user_id: user_id.to_string(),
            asset_id: asset_id.to_string(),
            month,
            amount: row.number("amount"),
            amount_per_share: row.number("amount_per_share"),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetType;
    use chrono::NaiveDateTime;

    fn asset(id: &str, ticker: &str) -> Asset {
        Asset {
            id: id.to_string(),
            user_id: "u1".to_string(),
            ticker: ticker.to_string(),
            name: Some("Fund, with comma".to_string()),
            asset_type: Some(AssetType::Brick),
            sector: None,
            notes: None,
            status: None,
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_export_assets_quotes_commas() {
        let csv = export_assets(&[asset("a1", "HGLG11")]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("ticker,name,type,sector,status,notes"));
        assert_eq!(lines.next(), Some("HGLG11,\"Fund, with comma\",brick,,,"));
    }

    #[test]
    fn test_export_incomes_uses_tickers() {
        let income = Income {
            id: "i1".to_string(),
            user_id: "u1".to_string(),
            asset_id: "a1".to_string(),
            month: "2024-05".parse().unwrap(),
            amount: Some(80.5),
            amount_per_share: None,
            created_at: NaiveDateTime::default(),
        };
        let csv = export_incomes(&[income], &[asset("a1", "HGLG11")]).unwrap();
        assert!(csv.contains("HGLG11,2024-05,80.5,"));
    }

    #[test]
    fn test_parse_assets_semicolon_and_trimming() {
        let content = "\u{feff} ticker ; name ; type\n hglg11 ; CSHG Log ; tijolo \n;;\n";
        let parsed = parse_assets(content, "u1").unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.skipped, 0);
        let row = &parsed.rows[0];
        assert_eq!(row.ticker, "HGLG11");
        assert_eq!(row.name.as_deref(), Some("CSHG Log"));
        assert_eq!(row.asset_type, Some(AssetType::Brick));
        assert_eq!(row.user_id, "u1");
    }

    #[test]
    fn test_parse_positions_skips_unknown_tickers() {
        let content = "ticker,quantity,avg_price,costs,start_date\n\
                       hglg11,10,\"160,5\",,2023-01-10\n\
                       XPTO11,5,10,,\n\
                       HGLG11,abc,10,,\n";
        let parsed = parse_positions(content, "u1", &[asset("a1", "HGLG11")]).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.skipped, 2);
        let row = &parsed.rows[0];
        assert_eq!(row.asset_id, "a1");
        assert_eq!(row.quantity, 10.0);
        assert_eq!(row.avg_price, 160.5);
        assert_eq!(row.costs, None);
        assert_eq!(row.start_date, NaiveDate::from_ymd_opt(2023, 1, 10));
    }

    #[test]
    fn test_parse_incomes_requires_valid_month() {
        let content = "ticker,month,amount,amount_per_share\n\
                       HGLG11,2024-05,80,\n\
                       HGLG11,May,80,\n\
                       HGLG11,2024-06,,1.1\n";
        let parsed = parse_incomes(content, "u1", &[asset("a1", "HGLG11")]).unwrap();
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.skipped, 1);
        assert_eq!(parsed.rows[1].amount, None);
        assert_eq!(parsed.rows[1].amount_per_share, Some(1.1));
    }

    #[test]
    fn test_parse_empty_content() {
        let parsed = parse_catalog("   \n", "u1").unwrap();
        assert!(parsed.rows.is_empty());
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn test_csv_entity_parse() {
        assert_eq!("Incomes".parse::<CsvEntity>().unwrap(), CsvEntity::Incomes);
        assert!("trades".parse::<CsvEntity>().is_err());
    }
}
