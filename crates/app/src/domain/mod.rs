//! Larder Domain Concerns

pub mod brands;
pub mod categories;
pub mod discounts;
pub mod lots;
pub mod products;
