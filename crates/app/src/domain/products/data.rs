//! Products Data

use jiff::civil::Date;
use rust_decimal::Decimal;

use crate::ids::{BrandUuid, CategoryUuid, ProductUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub unit_of_measure: String,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub expiration_date: Option<Date>,
    pub brand: BrandUuid,
    pub category: CategoryUuid,
}

/// Product Update Data
///
/// Near-expiry stock is owned by the lot sweep and cannot be updated directly.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub unit_of_measure: String,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub expiration_date: Option<Date>,
    pub brand: BrandUuid,
    pub category: CategoryUuid,
}

/// Product listing filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProductFilter {
    /// Every product
    #[default]
    All,

    /// Products expiring strictly before the date
    ExpiringBefore(Date),

    /// Products of the brand with this exact name
    BrandName(String),

    /// Products in the category with this exact name
    CategoryName(String),
}
