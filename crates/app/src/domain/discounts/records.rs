//! Discount Records

use jiff_sqlx::Timestamp as SqlxTimestamp;
use larder::discounts::{Discount, DiscountKind};
use sqlx::{FromRow, Row, postgres::PgRow};

use crate::ids::{DiscountUuid, ProductUuid};

/// Discount Record
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountRecord {
    pub uuid: DiscountUuid,
    pub product: ProductUuid,
    pub discount: Discount,
}

impl<'r> FromRow<'r, PgRow> for DiscountRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: DiscountUuid::from_uuid(row.try_get("uuid")?),
            product: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            discount: Discount {
                starts_at: row.try_get::<SqlxTimestamp, _>("starts_at")?.to_jiff(),
                ends_at: row.try_get::<SqlxTimestamp, _>("ends_at")?.to_jiff(),
                kind: DiscountKind::parse(row.try_get::<&str, _>("kind")?),
                value: row.try_get("value")?,
            },
        })
    }
}
