//! Lot Handlers

pub(crate) mod sweep;
