//! Numeric coercion for text entering from forms and CSV files.

/// Parse optional text into a finite number.
///
/// Blank, unparseable and non-finite input yield `None`. A comma is read as
/// the decimal separator when the text has no dot (`"10,5"` is `10.5`).
pub fn parse_optional_number(value: Option<&str>) -> Option<f64> {
    let text = value?.trim();
    if text.is_empty() {
        return None;
    }
    let normalized = if text.contains(',') && !text.contains('.') {
        text.replace(',', ".")
    } else {
        text.to_string()
    };
    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// `Some(value)` only for finite numbers.
pub fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_optional_number(Some("12.5")), Some(12.5));
        assert_eq!(parse_optional_number(Some(" 7 ")), Some(7.0));
        assert_eq!(parse_optional_number(Some("-0.25")), Some(-0.25));
    }

    #[test]
    fn test_parse_comma_decimal() {
        assert_eq!(parse_optional_number(Some("10,5")), Some(10.5));
        // With a dot present the comma is not a decimal separator
        assert_eq!(parse_optional_number(Some("1,000.5")), None);
    }

    #[test]
    fn test_parse_absent_and_garbage() {
        assert_eq!(parse_optional_number(None), None);
        assert_eq!(parse_optional_number(Some("")), None);
        assert_eq!(parse_optional_number(Some("   ")), None);
        assert_eq!(parse_optional_number(Some("abc")), None);
        assert_eq!(parse_optional_number(Some("NaN")), None);
        assert_eq!(parse_optional_number(Some("inf")), None);
    }
}
