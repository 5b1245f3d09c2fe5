//! Products

mod errors;
mod fields;
mod handlers;

pub(crate) use handlers::*;
