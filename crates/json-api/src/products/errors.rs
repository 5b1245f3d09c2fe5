//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use larder_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::BrandNotFound(brand) => {
            StatusError::not_found().brief(format!("Brand {brand} not found"))
        }
        ProductsServiceError::CategoryNotFound(category) => {
            StatusError::not_found().brief(format!("Category {category} not found"))
        }
        ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::Pricing(source) => {
            error!("failed to price product: {source}");

            StatusError::internal_server_error()
        }
        ProductsServiceError::Sql(source) => {
            error!("product storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
