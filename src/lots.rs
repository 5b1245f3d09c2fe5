//! Lot sweep
//!
//! Daily pass over the product set that latches near-expiry stock once a product
//! enters its last week, and removes one unit per day from expired stock.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    expiry::{days_to_expiry, in_critical_window},
    products::Product,
};

/// Change applied to a single product by the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LotTransition {
    /// Nothing to do.
    Unchanged,

    /// The whole current stock was marked as near expiry.
    Activated {
        /// New near-expiry quantity
        near_expiry_quantity: i32,
    },

    /// Near-expiry stock exceeded the stock on hand and was cut back to it.
    Reconciled {
        /// New near-expiry quantity
        near_expiry_quantity: i32,
    },

    /// One expired unit was removed.
    Decayed {
        /// New stock quantity
        stock_quantity: i32,

        /// New near-expiry quantity
        near_expiry_quantity: i32,
    },
}

impl LotTransition {
    /// Whether the product was modified and needs saving.
    pub fn is_change(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Result of sweeping a set of products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    /// Indices of changed products, paired with the change applied
    pub changed: Vec<(usize, LotTransition)>,

    /// Number of products examined
    pub examined: usize,

    /// Number of lots marked near expiry
    pub activated: usize,

    /// Number of expired units removed
    pub decayed: usize,
}

impl SweepOutcome {
    /// Count one examined product and the change the sweep applied to it.
    pub fn record(&mut self, index: usize, transition: LotTransition) {
        self.examined += 1;

        match transition {
            LotTransition::Unchanged | LotTransition::Reconciled { .. } => {}
            LotTransition::Activated { .. } => self.activated += 1,
            LotTransition::Decayed { .. } => self.decayed += 1,
        }

        if transition.is_change() {
            self.changed.push((index, transition));
        }
    }
}

/// Apply the sweep rules to a single product for `today`.
///
/// Afterwards `near_expiry_quantity` never exceeds the stock on hand.
pub fn sweep_product(product: &mut Product, today: Date) -> LotTransition {
    let transition = apply_rules(product, today);

    if transition == LotTransition::Unchanged && cap_near_expiry(product) {
        return LotTransition::Reconciled {
            near_expiry_quantity: product.near_expiry_quantity,
        };
    }

    transition
}

/// Clamp near-expiry stock to `0..=stock_quantity`, returning whether it changed.
fn cap_near_expiry(product: &mut Product) -> bool {
    let capped = product
        .near_expiry_quantity
        .min(product.stock_quantity)
        .max(0);

    if capped == product.near_expiry_quantity {
        return false;
    }

    product.near_expiry_quantity = capped;

    true
}

fn apply_rules(product: &mut Product, today: Date) -> LotTransition {
    let Some(expiration) = product.expiration_date else {
        return LotTransition::Unchanged;
    };

    let days = days_to_expiry(expiration, today);

    if in_critical_window(days) && product.near_expiry_quantity == 0 {
        product.near_expiry_quantity = product.stock_quantity;

        warn!(
            product = %product.name,
            near_expiry_quantity = product.near_expiry_quantity,
            "critical lot activated: {} units now at expiry pricing",
            product.near_expiry_quantity
        );

        return LotTransition::Activated {
            near_expiry_quantity: product.near_expiry_quantity,
        };
    }

    if days < 0 && product.stock_quantity > 0 {
        product.stock_quantity -= 1;

        if product.near_expiry_quantity > 0 {
            product.near_expiry_quantity -= 1;
        }

        cap_near_expiry(product);

        return LotTransition::Decayed {
            stock_quantity: product.stock_quantity,
            near_expiry_quantity: product.near_expiry_quantity,
        };
    }

    LotTransition::Unchanged
}

/// Sweep every product in `products` for `today`.
pub fn sweep<T: AsMut<Product>>(products: &mut [T], today: Date) -> SweepOutcome {
    let mut outcome = SweepOutcome::default();

    for (index, product) in products.iter_mut().enumerate() {
        outcome.record(index, sweep_product(product.as_mut(), today));
    }

    outcome
}
