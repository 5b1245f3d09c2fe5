//! Create Product Handler

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder_app::{domain::products::data::NewProduct, ids::ProductUuid};

use crate::{
    extensions::*,
    products::{errors::into_status_error, fields, get::ProductResponse},
};

fn default_unit_of_measure() -> String {
    "each".to_string()
}

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    /// Generated when omitted
    pub uuid: Option<Uuid>,

    pub name: String,

    #[serde(default = "default_unit_of_measure")]
    pub unit_of_measure: String,

    /// Unit price as a decimal string, e.g. `"1.20"`
    pub price: String,

    pub stock_quantity: i32,

    /// YYYY-MM-DD
    pub expiration_date: Option<String>,

    pub brand: Uuid,

    pub category: Uuid,
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = StatusError;

    fn try_from(request: CreateProductRequest) -> Result<Self, Self::Error> {
        Ok(NewProduct {
            uuid: request.uuid.map_or_else(ProductUuid::new, Into::into),
            price: fields::price(&request.price)?,
            expiration_date: fields::expiration_date(request.expiration_date.as_deref())?,
            name: fields::name(request.name)?,
            unit_of_measure: request.unit_of_measure,
            stock_quantity: request.stock_quantity,
            brand: request.brand.into(),
            category: request.category.into(),
        })
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::NOT_FOUND, description = "Brand or category not found"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let product = NewProduct::try_from(json.into_inner())?;

    let product = state
        .app
        .products
        .create_product(product)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}
