//! Lots

use jiff::civil::Date;
use larder_app::domain::lots::{LotsServiceError, report::SweepReport};

use crate::{observability, state::State};

mod handlers;

pub(crate) use handlers::*;

/// Run the lot sweep for `today`, recording the outcome in metrics.
pub(crate) async fn run_sweep(state: &State, today: Date) -> Result<SweepReport, LotsServiceError> {
    let result = state.app.lots.run_daily_sweep(today).await;

    observability::observe_sweep(result.as_ref().ok());

    result
}
