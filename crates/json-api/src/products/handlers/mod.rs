//! Product Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod discount;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod quote;
pub(crate) mod update;
