//! Get Product Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder::discounts::Discount;
use larder_app::domain::{
    brands::records::BrandRecord, categories::records::CategoryRecord, products::views::ProductView,
};

use crate::{extensions::*, products::errors::into_status_error};

/// Brand or category reference embedded in a product.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReferenceResponse {
    pub uuid: Uuid,
    pub name: String,
}

impl From<BrandRecord> for ReferenceResponse {
    fn from(brand: BrandRecord) -> Self {
        Self {
            uuid: brand.uuid.into(),
            name: brand.name,
        }
    }
}

impl From<CategoryRecord> for ReferenceResponse {
    fn from(category: CategoryRecord) -> Self {
        Self {
            uuid: category.uuid.into(),
            name: category.name,
        }
    }
}

/// Promotional discount attached to a product.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DiscountResponse {
    /// `PERCENT`, `FIXED`, or a kind this server does not apply
    pub kind: String,

    /// Percentage points or a fixed amount, as a decimal string
    pub value: String,

    /// Window start (exclusive), RFC 3339
    pub starts_at: String,

    /// Window end (exclusive), RFC 3339
    pub ends_at: String,
}

impl From<Discount> for DiscountResponse {
    fn from(discount: Discount) -> Self {
        Self {
            kind: discount.kind.to_string(),
            value: discount.value.to_string(),
            starts_at: discount.starts_at.to_string(),
            ends_at: discount.ends_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    pub name: String,

    pub unit_of_measure: String,

    /// Normal unit price, as a decimal string
    pub price: String,

    /// Unit price today after any expiry discount
    pub current_price: String,

    /// Whether near-expiry stock is selling below the normal price
    pub has_active_discount: bool,

    pub stock_quantity: i32,

    /// Units flagged for the expiry discount
    pub near_expiry_quantity: i32,

    /// YYYY-MM-DD
    pub expiration_date: Option<String>,

    pub brand: ReferenceResponse,

    pub category: ReferenceResponse,

    pub discounts: Vec<DiscountResponse>,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductView> for ProductResponse {
    fn from(product: ProductView) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            name: product.name,
            unit_of_measure: product.unit_of_measure,
            price: product.price.to_string(),
            current_price: product.current_price.to_string(),
            has_active_discount: product.has_active_discount,
            stock_quantity: product.stock_quantity,
            near_expiry_quantity: product.near_expiry_quantity,
            expiration_date: product.expiration_date.map(|date| date.to_string()),
            brand: product.brand.into(),
            category: product.category.into(),
            discounts: product.discounts.into_iter().map(Into::into).collect(),
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Get Product Handler
///
/// Returns a product priced for today.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let product = state
        .app
        .products
        .get_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
