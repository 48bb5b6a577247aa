//! Unit price handling.
//!
//! Prices are stored as integer cents. The admin API accepts them as decimal
//! strings with at most two fractional digits (`"49.99"`, `"5"`, `"5.5"`).

use crate::error::CoreError;

/// Lowest accepted unit price (1.00).
pub const MIN_PRICE_CENTS: i64 = 100;

/// Highest accepted unit price (9999.99): six digits, two of them decimals.
pub const MAX_PRICE_CENTS: i64 = 999_999;

/// Parse a decimal price string into cents and check it is within bounds.
pub fn parse_price(input: &str) -> Result<i64, CoreError> {
    let trimmed = input.trim();
    let invalid = || CoreError::Validation(format!("Invalid price '{trimmed}'"));

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }
    if fraction.len() > 2 {
        return Err(CoreError::Validation(
            "Price must have at most two decimal places".into(),
        ));
    }
    // Anything longer than this is out of range anyway; avoid overflow.
    if whole.trim_start_matches('0').len() > 6 {
        return Err(out_of_range());
    }

    let whole_value: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let fraction_value: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => fraction.parse().map_err(|_| invalid())?,
    };

    let cents = whole_value * 100 + fraction_value;
    validate_price_cents(cents)?;
    Ok(cents)
}

/// Check a cents value against [`MIN_PRICE_CENTS`] and [`MAX_PRICE_CENTS`].
pub fn validate_price_cents(cents: i64) -> Result<(), CoreError> {
    if (MIN_PRICE_CENTS..=MAX_PRICE_CENTS).contains(&cents) {
        Ok(())
    } else {
        Err(out_of_range())
    }
}

/// Render cents as a decimal string with exactly two fractional digits.
pub fn format_price(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Validate an inventory count (units in stock).
pub fn validate_inventory(inventory: i64) -> Result<(), CoreError> {
    if inventory < 0 {
        return Err(CoreError::Validation(
            "Inventory must not be negative".into(),
        ));
    }
    Ok(())
}

fn out_of_range() -> CoreError {
    CoreError::Validation(format!(
        "Price must be between {} and {}",
        format_price(MIN_PRICE_CENTS),
        format_price(MAX_PRICE_CENTS)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_common_forms() {
        assert_eq!(parse_price("99.99").unwrap(), 9999);
        assert_eq!(parse_price("49.9").unwrap(), 4990);
        assert_eq!(parse_price("5").unwrap(), 500);
        assert_eq!(parse_price(" 12.00 ").unwrap(), 1200);
        assert_eq!(parse_price("1.").unwrap(), 100);
    }

    #[test]
    fn enforces_bounds() {
        assert_eq!(parse_price("1.00").unwrap(), MIN_PRICE_CENTS);
        assert_eq!(parse_price("9999.99").unwrap(), MAX_PRICE_CENTS);
        assert!(parse_price("0.99").is_err());
        assert!(parse_price("10000").is_err());
        assert!(parse_price("123456789012345678901").is_err());
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", ".", "abc", "-5", "1e3", "1.234", "1.2.3", "12,50"] {
            assert_matches!(parse_price(bad), Err(CoreError::Validation(_)), "input {bad:?}");
        }
    }

    #[test]
    fn formats_cents() {
        assert_eq!(format_price(9999), "99.99");
        assert_eq!(format_price(500), "5.00");
        assert_eq!(format_price(7), "0.07");
        assert_eq!(format_price(-150), "-1.50");
    }

    #[test]
    fn inventory_must_not_be_negative() {
        assert!(validate_inventory(0).is_ok());
        assert!(validate_inventory(-1).is_err());
    }
}
