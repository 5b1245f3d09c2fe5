//! Expiry pricing

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::{
    expiry::{ExpiryTier, days_to_expiry},
    products::Product,
};

/// Errors that can occur while pricing a product.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Decimal arithmetic overflowed.
    #[error("price calculation overflowed")]
    Overflow,
}

/// Price breakdown for a requested quantity of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderQuote {
    /// Total price for the requested quantity
    pub total: Decimal,

    /// Normal unit price
    pub unit_price: Decimal,

    /// Expiry-discounted unit price
    pub discounted_unit_price: Decimal,

    /// Units billed at the discounted price
    pub discounted_quantity: i32,

    /// Units billed at the normal price
    pub full_price_quantity: i32,
}

/// Current expiry-discounted unit price for a single unit of `product`.
///
/// Products without an expiration date are always full price.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the arithmetic cannot be represented.
pub fn discounted_unit_price(product: &Product, today: Date) -> Result<Decimal, PricingError> {
    let Some(expiration) = product.expiration_date else {
        return Ok(product.price);
    };

    let tier = ExpiryTier::for_days(days_to_expiry(expiration, today));

    product
        .price
        .checked_mul(tier.multiplier())
        .ok_or(PricingError::Overflow)
}

/// Price `requested_quantity` units of `product`.
///
/// Only the units already flagged as near expiry are sold at the discounted price; any
/// remainder is billed at the normal price. Out of stock products always cost nothing.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the arithmetic cannot be represented.
pub fn quote_order(
    product: &Product,
    requested_quantity: i32,
    today: Date,
) -> Result<OrderQuote, PricingError> {
    let discounted = discounted_unit_price(product, today)?;

    if product.stock_quantity <= 0 {
        return Ok(OrderQuote {
            total: Decimal::ZERO,
            unit_price: product.price,
            discounted_unit_price: discounted,
            discounted_quantity: 0,
            full_price_quantity: 0,
        });
    }

    if discounted == product.price || product.near_expiry_quantity <= 0 {
        return Ok(OrderQuote {
            total: line_total(product.price, requested_quantity)?,
            unit_price: product.price,
            discounted_unit_price: discounted,
            discounted_quantity: 0,
            full_price_quantity: requested_quantity,
        });
    }

    let discounted_quantity = requested_quantity.min(product.near_expiry_quantity);
    let full_price_quantity = requested_quantity.saturating_sub(discounted_quantity).max(0);

    let total = line_total(discounted, discounted_quantity)?
        .checked_add(line_total(product.price, full_price_quantity)?)
        .ok_or(PricingError::Overflow)?;

    info!(
        product = %product.name,
        discounted_quantity,
        full_price_quantity,
        "blended price: {discounted_quantity} at reduced price, {full_price_quantity} at full price"
    );

    Ok(OrderQuote {
        total,
        unit_price: product.price,
        discounted_unit_price: discounted,
        discounted_quantity,
        full_price_quantity,
    })
}

/// Total price for `requested_quantity` units of `product`.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the arithmetic cannot be represented.
pub fn compute_order_price(
    product: &Product,
    requested_quantity: i32,
    today: Date,
) -> Result<Decimal, PricingError> {
    quote_order(product, requested_quantity, today).map(|quote| quote.total)
}

fn line_total(unit_price: Decimal, quantity: i32) -> Result<Decimal, PricingError> {
    unit_price
        .checked_mul(Decimal::from(quantity))
        .ok_or(PricingError::Overflow)
}
