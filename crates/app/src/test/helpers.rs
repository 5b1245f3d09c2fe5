//! Test Helpers

use jiff::{SignedDuration, Timestamp};
use larder::discounts::DiscountKind;
use rust_decimal::Decimal;

use crate::{
    domain::{
        discounts::{
            DiscountsService, DiscountsServiceError, data::NewDiscount, records::DiscountRecord,
        },
        products::{
            ProductsService, ProductsServiceError, data::NewProduct, views::ProductView,
        },
    },
    ids::{DiscountUuid, ProductUuid},
    test::TestContext,
};

/// New product under the context's default brand and category, with no expiry.
pub(crate) fn new_product(ctx: &TestContext, name: &str, price: Decimal, stock: i32) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        name: name.to_string(),
        unit_of_measure: "each".to_string(),
        price,
        stock_quantity: stock,
        expiration_date: None,
        brand: ctx.brand.uuid,
        category: ctx.category.uuid,
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: Decimal,
    stock: i32,
) -> Result<ProductView, ProductsServiceError> {
    ctx.products
        .create_product(new_product(ctx, name, price, stock))
        .await
}

/// Add a discount whose window is offset from now.
pub(crate) async fn add_discount(
    ctx: &TestContext,
    product: ProductUuid,
    kind: DiscountKind,
    value: Decimal,
    starts_in: SignedDuration,
    ends_in: SignedDuration,
) -> Result<DiscountRecord, DiscountsServiceError> {
    let now = Timestamp::now();

    ctx.discounts
        .create_discount(NewDiscount {
            uuid: DiscountUuid::new(),
            product,
            kind,
            value,
            starts_at: now + starts_in,
            ends_at: now + ends_in,
        })
        .await
}
