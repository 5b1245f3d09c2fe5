//! Product Views

use jiff::{Timestamp, civil::Date};
use larder::{
    discounts::Discount,
    pricing::{PricingError, discounted_unit_price},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        brands::records::BrandRecord, categories::records::CategoryRecord,
        products::records::ProductRecord,
    },
    ids::ProductUuid,
};

/// Product as presented to callers, priced for a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    pub uuid: ProductUuid,
    pub name: String,
    pub unit_of_measure: String,

    /// Normal unit price
    pub price: Decimal,

    /// Expiry-discounted unit price for the day the view was built
    pub current_price: Decimal,

    /// Whether near-expiry stock is currently selling below `price`
    pub has_active_discount: bool,

    pub stock_quantity: i32,
    pub near_expiry_quantity: i32,
    pub expiration_date: Option<Date>,
    pub brand: BrandRecord,
    pub category: CategoryRecord,
    pub discounts: Vec<Discount>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductView {
    /// Build a view of `record` priced for `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the discounted price overflows.
    pub fn priced(record: ProductRecord, today: Date) -> Result<Self, PricingError> {
        let current_price = discounted_unit_price(&record.details, today)?;
        let details = record.details;

        Ok(Self {
            uuid: record.uuid,
            has_active_discount: current_price < details.price && details.near_expiry_quantity > 0,
            current_price,
            name: details.name,
            unit_of_measure: details.unit_of_measure,
            price: details.price,
            stock_quantity: details.stock_quantity,
            near_expiry_quantity: details.near_expiry_quantity,
            expiration_date: details.expiration_date,
            brand: record.brand,
            category: record.category,
            discounts: details.discounts.into_vec(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::{ToSpan, civil::date};
    use larder::products::Product;
    use testresult::TestResult;

    use crate::ids::{BrandUuid, CategoryUuid};

    use super::*;

    fn record(details: Product) -> ProductRecord {
        ProductRecord {
            uuid: ProductUuid::new(),
            brand: BrandRecord {
                uuid: BrandUuid::new(),
                name: "Hillside".to_string(),
            },
            category: CategoryRecord {
                uuid: CategoryUuid::new(),
                name: "Dairy".to_string(),
            },
            details,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn flagged_stock_near_expiry_is_an_active_discount() -> TestResult {
        let today = date(2025, 6, 1);
        let details = Product::new("Milk", Decimal::from(2), 10)
            .with_expiration_date(today.checked_add(2.days())?)
            .with_near_expiry_quantity(10);

        let view = ProductView::priced(record(details), today)?;

        assert_eq!(view.current_price, Decimal::from(1));
        assert!(view.has_active_discount, "expected an active discount");

        Ok(())
    }

    #[test]
    fn unflagged_stock_is_not_an_active_discount() -> TestResult {
        let today = date(2025, 6, 1);
        let details = Product::new("Milk", Decimal::from(2), 10)
            .with_expiration_date(today.checked_add(2.days())?);

        let view = ProductView::priced(record(details), today)?;

        assert_eq!(view.current_price, Decimal::from(1));
        assert!(!view.has_active_discount, "no stock is flagged yet");

        Ok(())
    }

    #[test]
    fn fresh_stock_is_full_price() -> TestResult {
        let today = date(2025, 6, 1);
        let details = Product::new("Rice", Decimal::from(3), 10).with_near_expiry_quantity(4);

        let view = ProductView::priced(record(details), today)?;

        assert_eq!(view.current_price, Decimal::from(3));
        assert!(!view.has_active_discount, "price is unchanged");
        assert_eq!(view.brand.name, "Hillside");

        Ok(())
    }
}
