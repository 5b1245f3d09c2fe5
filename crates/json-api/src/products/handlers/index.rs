//! Product Index Handler

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use larder_app::domain::products::data::ProductFilter;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}

fn product_filter(
    brand: Option<String>,
    category: Option<String>,
    expiring_before: QueryParam<String, false>,
) -> Result<ProductFilter, StatusError> {
    let expiring_before = expiring_before.into_date("expiring_before")?;

    match (brand, category, expiring_before) {
        (None, None, None) => Ok(ProductFilter::All),
        (Some(brand), None, None) => Ok(ProductFilter::BrandName(brand)),
        (None, Some(category), None) => Ok(ProductFilter::CategoryName(category)),
        (None, None, Some(date)) => Ok(ProductFilter::ExpiringBefore(date)),
        _ => Err(StatusError::bad_request()
            .brief("only one of brand, category or expiring_before may be given")),
    }
}

/// Product Index Handler
///
/// Returns products priced for today, optionally filtered by brand name,
/// category name or an expiry cutoff.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    brand: QueryParam<String, false>,
    category: QueryParam<String, false>,
    expiring_before: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let filter = product_filter(brand.into_inner(), category.into_inner(), expiring_before)?;

    let products = state
        .app
        .products
        .list_products(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}
