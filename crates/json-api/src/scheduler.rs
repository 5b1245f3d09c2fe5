//! Daily lot sweep timer

use std::sync::Arc;

use jiff::{Timestamp, Zoned, civil::Time, tz::TimeZone};
use tokio::{sync::watch, time};
use tracing::{error, info, warn};

use crate::{lots, state::State};

/// Wall-clock time of day the sweep runs at, in a fixed time zone.
#[derive(Debug, Clone)]
pub(crate) struct SweepSchedule {
    at: Time,
    time_zone: TimeZone,
}

impl SweepSchedule {
    pub(crate) fn new(at: Time, time_zone: TimeZone) -> Self {
        Self { at, time_zone }
    }

    /// First scheduled instant strictly after `now`.
    pub(crate) fn next_run_after(&self, now: Timestamp) -> Result<Zoned, jiff::Error> {
        let now = now.to_zoned(self.time_zone.clone());
        let candidate = now.date().to_datetime(self.at).to_zoned(self.time_zone.clone())?;

        if candidate.timestamp() > now.timestamp() {
            return Ok(candidate);
        }

        now.date()
            .tomorrow()?
            .to_datetime(self.at)
            .to_zoned(self.time_zone.clone())
    }
}

/// Run the sweep once per scheduled slot until `stop` flips.
pub(crate) async fn run(state: Arc<State>, schedule: SweepSchedule, mut stop: watch::Receiver<bool>) {
    let mut last_slot: Option<Timestamp> = None;

    loop {
        let now = state.app.clock.now();

        // The wall clock can trail the timer after a wakeup; never hand back a swept slot
        let from = last_slot.map_or(now, |last| last.max(now));

        let next = match schedule.next_run_after(from) {
            Ok(next) => next,
            Err(source) => {
                error!("could not compute next lot sweep time, timer stopped: {source}");
                return;
            }
        };

        let wait = next.timestamp().duration_since(now).unsigned_abs();

        info!(next_run = %next, "lot sweep scheduled");

        tokio::select! {
            () = time::sleep(wait) => {}
            _ = stop.changed() => {
                info!("lot sweep timer stopped");
                return;
            }
        }

        last_slot = Some(next.timestamp());

        // The slot's own date, so a slightly early wakeup cannot sweep yesterday twice
        let today = next.date();

        if let Err(source) = lots::run_sweep(&state, today).await {
            warn!(%today, "scheduled lot sweep failed: {source}");
        }
    }
}
