//! Products

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::discounts::Discount;

/// Product pricing and stock record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product name
    pub name: String,

    /// Unit the product is sold in (e.g. `kg`, `each`)
    pub unit_of_measure: String,

    /// Normal unit price
    pub price: Decimal,

    /// Units currently in stock
    pub stock_quantity: i32,

    /// Units currently eligible for the expiry discount; zero until the lot is marked critical
    pub near_expiry_quantity: i32,

    /// Expiration date; products without one never expire and never discount
    pub expiration_date: Option<Date>,

    /// Promotional discounts, in collection order
    pub discounts: SmallVec<[Discount; 2]>,
}

impl Product {
    /// Create a product with no near-expiry stock, expiration date or discounts.
    pub fn new(name: impl Into<String>, price: Decimal, stock_quantity: i32) -> Self {
        Self {
            name: name.into(),
            unit_of_measure: String::from("each"),
            price,
            stock_quantity,
            near_expiry_quantity: 0,
            expiration_date: None,
            discounts: SmallVec::new(),
        }
    }

    /// Set the expiration date.
    #[must_use]
    pub fn with_expiration_date(mut self, expiration_date: Date) -> Self {
        self.expiration_date = Some(expiration_date);
        self
    }

    /// Set the near-expiry quantity.
    #[must_use]
    pub fn with_near_expiry_quantity(mut self, near_expiry_quantity: i32) -> Self {
        self.near_expiry_quantity = near_expiry_quantity;
        self
    }

    /// Append a promotional discount.
    #[must_use]
    pub fn with_discount(mut self, discount: Discount) -> Self {
        self.discounts.push(discount);
        self
    }
}

impl AsMut<Product> for Product {
    fn as_mut(&mut self) -> &mut Product {
        self
    }
}
