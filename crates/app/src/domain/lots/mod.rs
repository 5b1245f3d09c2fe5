//! Lots
//!
//! Persistence boundary around the daily lot sweep.

pub mod errors;
pub mod report;
pub mod service;

pub use errors::LotsServiceError;
pub use service::*;
