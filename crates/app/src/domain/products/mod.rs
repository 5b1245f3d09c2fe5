//! Products

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;
pub mod views;

pub use errors::ProductsServiceError;
pub use service::*;
