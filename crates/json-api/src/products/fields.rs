//! Product payload field parsing.

use jiff::civil::Date;
use rust_decimal::Decimal;
use salvo::prelude::StatusError;

use crate::extensions::*;

/// Parse a non-negative decimal price such as `"1.20"`.
pub(crate) fn price(value: &str) -> Result<Decimal, StatusError> {
    let price = value.trim().parse::<Decimal>().or_400("price must be a decimal")?;

    if price.is_sign_negative() {
        return Err(StatusError::bad_request().brief("price cannot be negative"));
    }

    Ok(price)
}

/// Parse an optional `YYYY-MM-DD` expiration date.
pub(crate) fn expiration_date(value: Option<&str>) -> Result<Option<Date>, StatusError> {
    value
        .map(str::parse::<Date>)
        .transpose()
        .or_400("expiration_date must be YYYY-MM-DD")
}

pub(crate) fn name(value: String) -> Result<String, StatusError> {
    if value.trim().is_empty() {
        return Err(StatusError::bad_request().brief("name cannot be empty"));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn prices_keep_their_scale() -> TestResult {
        assert_eq!(price("1.20")?, Decimal::new(120, 2));

        Ok(())
    }

    #[test]
    fn negative_and_malformed_prices_are_rejected() {
        assert!(price("-0.01").is_err(), "negative price accepted");
        assert!(price("one pound").is_err(), "malformed price accepted");
    }

    #[test]
    fn expiration_dates_are_optional() -> TestResult {
        assert_eq!(expiration_date(None)?, None);
        assert_eq!(
            expiration_date(Some("2025-06-04"))?,
            Some(date(2025, 6, 4))
        );
        assert!(expiration_date(Some("04/06/2025")).is_err());

        Ok(())
    }
}
