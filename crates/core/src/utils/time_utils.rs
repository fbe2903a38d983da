use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{Error, Result, ValidationError};

/// Current calendar date on the process clock (UTC).
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// A calendar month, written `YYYY-MM`.
///
/// Ordering is chronological, which is also the lexicographic order of the
/// text form since years are always four digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1000..=9999).contains(&year) || !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth(format!("{}-{}", year, month)).into());
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The month before this one.
    pub fn pred(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The month after this one.
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let invalid = || Error::from(ValidationError::InvalidMonth(text.to_string()));
        let (year, month) = text.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        MonthKey::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_key_parse_and_display() {
        let key: MonthKey = "2024-05".parse().unwrap();
        assert_eq!(key.year(), 2024);
        assert_eq!(key.month(), 5);
        assert_eq!(key.to_string(), "2024-05");
    }

    #[test]
    fn test_month_key_rejects_malformed_text() {
        for bad in ["2024-13", "2024-00", "2024-5", "24-05", "2024/05", "", "abcd-ef"] {
            assert!(bad.parse::<MonthKey>().is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_month_key_order_matches_text_order() {
        let mut keys: Vec<MonthKey> = ["2024-02", "2023-12", "2024-10", "2024-01"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        keys.sort();
        let text: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        let mut sorted_text = text.clone();
        sorted_text.sort();
        assert_eq!(text, sorted_text);
        assert_eq!(text[0], "2023-12");
    }

    #[test]
    fn test_month_key_pred_wraps_year() {
        let key: MonthKey = "2024-01".parse().unwrap();
        assert_eq!(key.pred().to_string(), "2023-12");
    }

    #[test]
    fn test_month_key_succ_wraps_year() {
        let key: MonthKey = "2023-12".parse().unwrap();
        assert_eq!(key.succ().to_string(), "2024-01");
        assert_eq!(key.succ().pred(), key);
    }

    #[test]
    fn test_month_key_serde_as_string() {
        let key: MonthKey = "2024-03".parse().unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2024-03\"");
        let back: MonthKey = serde_json::from_str("\"2024-03\"").unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<MonthKey>("\"2024-3\"").is_err());
    }
}
