use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Point-in-time price and book value snapshot for an asset.
///
/// Valuations have no uniqueness key: several may share an asset and date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Valuation {
    pub id: String,
    pub user_id: String,
    pub asset_id: String,
    pub date: Option<NaiveDate>,
    pub price: Option<f64>,
    pub book_value_per_share: Option<f64>,
    pub price_to_book: Option<f64>,
    pub source: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Valuation {
    /// Ordering key for "latest" selection: the valuation date, else the
    /// creation date, with the creation timestamp breaking ties.
    pub fn recency_key(&self) -> (NaiveDate, NaiveDateTime) {
        (
            self.date.unwrap_or_else(|| self.created_at.date()),
            self.created_at,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewValuation {
    #[serde(default)]
    pub user_id: String,
    pub asset_id: String,
    pub date: Option<NaiveDate>,
    pub price: Option<f64>,
    pub book_value_per_share: Option<f64>,
    pub price_to_book: Option<f64>,
    pub source: Option<String>,
}

impl NewValuation {
    pub fn validate(&self) -> Result<()> {
        if self.asset_id.trim().is_empty() {
            return Err(ValidationError::MissingField("assetId".to_string()).into());
        }
        for (field, value) in [
            ("price", self.price),
            ("bookValuePerShare", self.book_value_per_share),
            ("priceToBook", self.price_to_book),
        ] {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(
                    ValidationError::InvalidInput(format!("{} must be a number", field)).into(),
                );
            }
        }
        Ok(())
    }
}

/// Resolve P/VP: the explicit value when given, else `price / book value`
/// when both are present and book value is nonzero.
pub fn resolve_price_to_book(
    explicit: Option<f64>,
    price: Option<f64>,
    book_value_per_share: Option<f64>,
) -> Option<f64> {
    if let Some(pvp) = explicit.filter(|v| v.is_finite()) {
        return Some(pvp);
    }
    match (price, book_value_per_share) {
        (Some(price), Some(book)) if book != 0.0 => Some(price / book).filter(|v| v.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_price_to_book_prefers_explicit() {
        assert_eq!(resolve_price_to_book(Some(0.95), Some(10.0), Some(5.0)), Some(0.95));
    }

    #[test]
    fn test_resolve_price_to_book_computes_ratio() {
        assert_eq!(resolve_price_to_book(None, Some(9.0), Some(10.0)), Some(0.9));
    }

    #[test]
    fn test_resolve_price_to_book_missing_inputs() {
        assert_eq!(resolve_price_to_book(None, Some(9.0), Some(0.0)), None);
        assert_eq!(resolve_price_to_book(None, None, Some(10.0)), None);
        assert_eq!(resolve_price_to_book(None, Some(9.0), None), None);
    }

    #[test]
    fn test_recency_key_falls_back_to_created_at() {
        let created = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let valuation = Valuation {
            id: "v1".to_string(),
            user_id: "u1".to_string(),
            asset_id: "a1".to_string(),
            date: None,
            price: Some(10.0),
            book_value_per_share: None,
            price_to_book: None,
            source: None,
            created_at: created,
        };
        assert_eq!(valuation.recency_key().0, created.date());
    }
}
