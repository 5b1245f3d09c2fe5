//! Larder prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    discounts::{Discount, DiscountKind, apply_discount, find_active_discount},
    expiry::{ExpiryTier, days_to_expiry},
    lots::{LotTransition, SweepOutcome, sweep, sweep_product},
    pricing::{OrderQuote, PricingError, compute_order_price, discounted_unit_price, quote_order},
    products::Product,
};
