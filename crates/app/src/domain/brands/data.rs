//! Brands Data

use crate::ids::BrandUuid;

/// New Brand Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBrand {
    pub uuid: BrandUuid,
    pub name: String,
}
