//! Brand Handlers

pub(crate) mod create;
pub(crate) mod index;
