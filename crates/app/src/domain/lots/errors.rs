//! Lots service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LotsServiceError {
    #[error("failed to load products for the lot sweep")]
    Sql(#[from] sqlx::Error),
}
