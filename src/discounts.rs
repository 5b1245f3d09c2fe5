//! Discounts
//!
//! Promotional discounts attached to a product. These are independent of the
//! expiry-driven pricing in [`crate::pricing`]; nothing composes the two.

use std::fmt;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::PricingError;

/// How a discount value is applied to a price.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DiscountKind {
    /// `value` is a percentage taken off the price.
    Percent,

    /// `value` is an amount subtracted from the price, floored at zero.
    Fixed,

    /// Any unrecognised type. Applying it leaves the price unchanged.
    Other(String),
}

impl DiscountKind {
    /// Parse a stored discount type, ignoring ASCII case.
    pub fn parse(kind: &str) -> Self {
        if kind.eq_ignore_ascii_case("PERCENT") {
            Self::Percent
        } else if kind.eq_ignore_ascii_case("FIXED") {
            Self::Fixed
        } else {
            Self::Other(kind.to_owned())
        }
    }

    /// Stored representation of the type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Percent => "PERCENT",
            Self::Fixed => "FIXED",
            Self::Other(kind) => kind,
        }
    }
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for DiscountKind {
    fn from(kind: &str) -> Self {
        Self::parse(kind)
    }
}

impl From<String> for DiscountKind {
    fn from(kind: String) -> Self {
        Self::parse(&kind)
    }
}

impl From<DiscountKind> for String {
    fn from(kind: DiscountKind) -> Self {
        kind.as_str().to_owned()
    }
}

/// A promotional discount valid for an open time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    /// Window start (exclusive)
    pub starts_at: Timestamp,

    /// Window end (exclusive)
    pub ends_at: Timestamp,

    /// Discount type
    pub kind: DiscountKind,

    /// Percentage or fixed amount, depending on `kind`
    pub value: Decimal,
}

impl Discount {
    /// Whether `now` falls strictly inside the discount window.
    pub fn is_active_at(&self, now: Timestamp) -> bool {
        self.starts_at < now && now < self.ends_at
    }

    /// Apply this discount to a price.
    ///
    /// # Errors
    ///
    /// See [`apply_discount`].
    pub fn apply(&self, original: Decimal) -> Result<Decimal, PricingError> {
        apply_discount(original, self.value, &self.kind)
    }
}

/// Apply a discount `value` of the given `kind` to `original`.
///
/// Percentage discounts take `value` percent off, fixed discounts subtract `value` but
/// never go below zero, and any other kind returns `original` unchanged.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the arithmetic cannot be represented.
pub fn apply_discount(
    original: Decimal,
    value: Decimal,
    kind: &DiscountKind,
) -> Result<Decimal, PricingError> {
    match kind {
        DiscountKind::Percent => value
            .checked_div(Decimal::ONE_HUNDRED)
            .and_then(|fraction| Decimal::ONE.checked_sub(fraction))
            .and_then(|multiplier| multiplier.checked_mul(original))
            .ok_or(PricingError::Overflow),
        DiscountKind::Fixed => original
            .checked_sub(value)
            .map(|price| price.max(Decimal::ZERO))
            .ok_or(PricingError::Overflow),
        DiscountKind::Other(_) => Ok(original),
    }
}

/// Find the first discount in `discounts` whose window strictly contains `now`.
pub fn find_active_discount(discounts: &[Discount], now: Timestamp) -> Option<&Discount> {
    discounts.iter().find(|discount| discount.is_active_at(now))
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    fn window(now: Timestamp, from_hours: i64, to_hours: i64, value: i64) -> Discount {
        Discount {
            starts_at: now + SignedDuration::from_hours(from_hours),
            ends_at: now + SignedDuration::from_hours(to_hours),
            kind: DiscountKind::Percent,
            value: Decimal::from(value),
        }
    }

    #[test]
    fn percent_discount_takes_percentage_off() -> TestResult {
        let price = apply_discount(Decimal::from(100), Decimal::from(20), &DiscountKind::Percent)?;

        assert_eq!(price, Decimal::from(80));

        Ok(())
    }

    #[test]
    fn fixed_discount_is_floored_at_zero() -> TestResult {
        let price = apply_discount(Decimal::from(100), Decimal::from(150), &DiscountKind::Fixed)?;

        assert_eq!(price, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn fixed_discount_subtracts_value() -> TestResult {
        let price = apply_discount(Decimal::from(100), Decimal::from(15), &DiscountKind::Fixed)?;

        assert_eq!(price, Decimal::from(85));

        Ok(())
    }

    #[test]
    fn unknown_discount_kind_leaves_price_unchanged() -> TestResult {
        let kind = DiscountKind::parse("UNKNOWN");
        let price = apply_discount(Decimal::from(100), Decimal::from(20), &kind)?;

        assert_eq!(kind, DiscountKind::Other("UNKNOWN".to_string()));
        assert_eq!(price, Decimal::from(100));

        Ok(())
    }

    #[test]
    fn kind_parsing_ignores_case() {
        assert_eq!(DiscountKind::parse("percent"), DiscountKind::Percent);
        assert_eq!(DiscountKind::parse("Fixed"), DiscountKind::Fixed);
        assert_eq!(DiscountKind::Percent.to_string(), "PERCENT");
    }

    #[test]
    fn percent_overflow_is_an_error() {
        let result = apply_discount(Decimal::MAX, Decimal::from(-100), &DiscountKind::Percent);

        assert!(
            matches!(result, Err(PricingError::Overflow)),
            "expected overflow, got {result:?}"
        );
    }

    #[test]
    fn no_active_discount_without_discounts() {
        assert!(find_active_discount(&[], Timestamp::now()).is_none());
    }

    #[test]
    fn first_matching_discount_wins() {
        let now = Timestamp::now();
        let discounts = [
            window(now, -48, -24, 5),
            window(now, -2, 2, 10),
            window(now, -1, 1, 20),
        ];

        let active = find_active_discount(&discounts, now);

        assert_eq!(active.map(|discount| discount.value), Some(Decimal::from(10)));
    }

    #[test]
    fn window_bounds_are_exclusive() {
        let now = Timestamp::now();
        let starts_now = window(now, 0, 1, 10);
        let ends_now = window(now, -1, 0, 10);

        assert!(!starts_now.is_active_at(now), "start bound is exclusive");
        assert!(!ends_now.is_active_at(now), "end bound is exclusive");
        assert!(find_active_discount(&[starts_now, ends_now], now).is_none());
    }
}
