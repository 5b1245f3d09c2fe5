//! Product Records

use jiff::Timestamp;
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use larder::products::Product;
use smallvec::SmallVec;
use sqlx::{FromRow, Row, postgres::PgRow};

use crate::{
    domain::{brands::records::BrandRecord, categories::records::CategoryRecord},
    ids::{BrandUuid, CategoryUuid, ProductUuid},
};

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub brand: BrandRecord,
    pub category: CategoryRecord,

    /// Pricing, stock and discount details
    pub details: Product,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AsMut<Product> for ProductRecord {
    fn as_mut(&mut self) -> &mut Product {
        &mut self.details
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            brand: BrandRecord {
                uuid: BrandUuid::from_uuid(row.try_get("brand_uuid")?),
                name: row.try_get("brand_name")?,
            },
            category: CategoryRecord {
                uuid: CategoryUuid::from_uuid(row.try_get("category_uuid")?),
                name: row.try_get("category_name")?,
            },
            details: Product {
                name: row.try_get("name")?,
                unit_of_measure: row.try_get("unit_of_measure")?,
                price: row.try_get("price")?,
                stock_quantity: row.try_get("stock_quantity")?,
                near_expiry_quantity: row.try_get("near_expiry_quantity")?,
                expiration_date: row
                    .try_get::<Option<SqlxDate>, _>("expiration_date")?
                    .map(SqlxDate::to_jiff),
                discounts: SmallVec::new(),
            },
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
