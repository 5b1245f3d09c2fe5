//! Sweep reports

use jiff::civil::Date;
use larder::lots::SweepOutcome;
use serde::{Deserialize, Serialize};

use crate::ids::ProductUuid;

/// Summary of one lot sweep run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Day the sweep ran for
    pub today: Date,

    /// Products examined
    pub examined: usize,

    /// Lots newly marked near expiry
    pub activated: usize,

    /// Expired units removed
    pub decayed: usize,

    /// Changed products saved successfully
    pub persisted: usize,

    /// Changed products that could not be saved
    pub failures: Vec<SweepFailure>,
}

impl SweepReport {
    #[must_use]
    pub fn new(today: Date, outcome: &SweepOutcome) -> Self {
        Self {
            today,
            examined: outcome.examined,
            activated: outcome.activated,
            decayed: outcome.decayed,
            persisted: 0,
            failures: Vec::new(),
        }
    }

    /// Whether every changed product was saved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A changed product the sweep failed to save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepFailure {
    pub product: ProductUuid,
    pub name: String,
    pub reason: String,
}
