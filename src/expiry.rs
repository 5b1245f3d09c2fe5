//! Expiry tiers

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Signed whole days from `today` until `expiration`. Negative once expired.
pub fn days_to_expiry(expiration: Date, today: Date) -> i32 {
    (expiration - today).get_days()
}

/// Discount tier for a number of days left before expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpiryTier {
    /// Expires today or has already expired: 75% off.
    Spoiling,

    /// One to three days left: 50% off.
    Critical,

    /// Four to seven days left: 20% off.
    Approaching,

    /// More than a week left: full price.
    Fresh,
}

impl ExpiryTier {
    /// Tier for `days` left until expiry.
    pub fn for_days(days: i32) -> Self {
        match days {
            i32::MIN..=0 => Self::Spoiling,
            1..=3 => Self::Critical,
            4..=7 => Self::Approaching,
            _ => Self::Fresh,
        }
    }

    /// Multiplier applied to the normal unit price.
    pub fn multiplier(self) -> Decimal {
        match self {
            Self::Spoiling => Decimal::new(25, 2),
            Self::Critical => Decimal::new(50, 2),
            Self::Approaching => Decimal::new(80, 2),
            Self::Fresh => Decimal::ONE,
        }
    }
}

/// Whether a product `days` from expiry is inside the window where its lot is marked critical.
pub fn in_critical_window(days: i32) -> bool {
    (0..=7).contains(&days)
}
