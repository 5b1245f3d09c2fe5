//! Brand Index Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder_app::domain::brands::records::BrandRecord;

use crate::{brands::errors::into_status_error, extensions::*};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BrandResponse {
    pub uuid: Uuid,
    pub name: String,
}

impl From<BrandRecord> for BrandResponse {
    fn from(brand: BrandRecord) -> Self {
        Self {
            uuid: brand.uuid.into(),
            name: brand.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BrandsResponse {
    /// Brands ordered by name
    pub brands: Vec<BrandResponse>,
}

/// Brand Index Handler
#[endpoint(tags("brands"), summary = "List Brands")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<BrandsResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let brands = state
        .app
        .brands
        .list_brands()
        .await
        .map_err(into_status_error)?;

    Ok(Json(BrandsResponse {
        brands: brands.into_iter().map(Into::into).collect(),
    }))
}
