//! Active Discount Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::DiscountResponse},
};

/// Active Discount Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ActiveDiscountResponse {
    /// First promotional discount active right now, if any
    pub discount: Option<DiscountResponse>,
}

/// Active Discount Handler
///
/// Returns the product's promotional discount active at the current instant.
#[endpoint(
    tags("products"),
    summary = "Active Discount",
    responses(
        (status_code = StatusCode::OK, description = "Active discount, possibly none"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ActiveDiscountResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let discount = state
        .app
        .products
        .active_discount(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ActiveDiscountResponse {
        discount: discount.map(Into::into),
    }))
}
