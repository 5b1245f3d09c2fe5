//! Larder
//!
//! Larder is the pricing and lot engine behind a grocery catalog: expiry-tiered unit
//! prices, blended order pricing over near-expiry stock, promotional discount lookup and
//! the daily lot sweep. It performs no I/O; callers supply products, dates and instants.

pub mod discounts;
pub mod expiry;
pub mod lots;
pub mod prelude;
pub mod pricing;
pub mod products;
