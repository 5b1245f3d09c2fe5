//! Extension traits

mod date;
mod depot;
mod result;

pub(crate) use date::DateParamExt as _;
pub(crate) use depot::DepotExt as _;
pub(crate) use result::ResultExt as _;
