//! Lot Sweep Config

use clap::Args;
use jiff::{civil::Time, tz::TimeZone};

/// Daily lot sweep settings.
#[derive(Debug, Args)]
pub struct SweepConfig {
    /// Run the lot sweep once a day while the server is up.
    #[arg(long, env = "SWEEP_ENABLED", default_value_t = true, action = clap::ArgAction::Set)]
    pub sweep_enabled: bool,

    /// Wall-clock time of the daily sweep (HH:MM)
    #[arg(long, env = "SWEEP_AT", default_value = "00:00")]
    pub sweep_at: Time,

    /// IANA time zone "today" is resolved in; the system zone when unset
    #[arg(long = "sweep-time-zone", env = "SWEEP_TIME_ZONE")]
    pub sweep_time_zone: Option<String>,
}

impl SweepConfig {
    /// Resolve the configured time zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the zone name is not in the time zone database.
    pub fn time_zone(&self) -> Result<TimeZone, jiff::Error> {
        match &self.sweep_time_zone {
            Some(name) => TimeZone::get(name),
            None => Ok(TimeZone::system()),
        }
    }
}
