//! Quote Order Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder::pricing::OrderQuote;

use crate::{extensions::*, products::errors::into_status_error};

/// Order Quote Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteResponse {
    pub quantity: i32,

    /// Total price of the order, as a decimal string
    pub total: String,

    /// Normal unit price
    pub unit_price: String,

    /// Unit price charged for near-expiry units
    pub discounted_unit_price: String,

    /// Units charged at the discounted price
    pub discounted_quantity: i32,

    /// Units charged at the normal price
    pub full_price_quantity: i32,
}

impl QuoteResponse {
    fn new(quantity: i32, quote: &OrderQuote) -> Self {
        Self {
            quantity,
            total: quote.total.to_string(),
            unit_price: quote.unit_price.to_string(),
            discounted_unit_price: quote.discounted_unit_price.to_string(),
            discounted_quantity: quote.discounted_quantity,
            full_price_quantity: quote.full_price_quantity,
        }
    }
}

/// Quote Order Handler
///
/// Prices `quantity` units of a product for today.
#[endpoint(
    tags("products"),
    summary = "Quote Order",
    responses(
        (status_code = StatusCode::OK, description = "Order quote"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    quantity: QueryParam<i32, true>,
    depot: &mut Depot,
) -> Result<Json<QuoteResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let quantity = quantity.into_inner();

    let quote = state
        .app
        .products
        .quote_order(product.into_inner().into(), quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(QuoteResponse::new(quantity, &quote)))
}
