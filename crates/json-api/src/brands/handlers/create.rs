//! Create Brand Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder_app::{domain::brands::data::NewBrand, ids::BrandUuid};

use crate::{
    brands::{errors::into_status_error, index::BrandResponse},
    extensions::*,
};

/// Create Brand Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateBrandRequest {
    /// Generated when omitted
    pub uuid: Option<Uuid>,

    /// Unique brand name
    pub name: String,
}

/// Create Brand Handler
#[endpoint(
    tags("brands"),
    summary = "Create Brand",
    responses(
        (status_code = StatusCode::CREATED, description = "Brand created"),
        (status_code = StatusCode::CONFLICT, description = "Brand already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateBrandRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BrandResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let request = json.into_inner();

    if request.name.trim().is_empty() {
        return Err(StatusError::bad_request().brief("name cannot be empty"));
    }

    let brand = state
        .app
        .brands
        .create_brand(NewBrand {
            uuid: request.uuid.map_or_else(BrandUuid::new, Into::into),
            name: request.name,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(brand.into()))
}
