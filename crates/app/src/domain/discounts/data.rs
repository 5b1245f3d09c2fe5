//! Discounts Data

use jiff::Timestamp;
use larder::discounts::DiscountKind;
use rust_decimal::Decimal;

use crate::ids::{DiscountUuid, ProductUuid};

/// New Discount Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewDiscount {
    pub uuid: DiscountUuid,
    pub product: ProductUuid,
    pub kind: DiscountKind,
    pub value: Decimal,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}
