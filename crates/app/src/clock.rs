//! Clock

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use mockall::automock;

/// Source of "today" and "now" for pricing and the lot sweep.
#[automock]
pub trait Clock: Send + Sync {
    /// Current calendar date.
    fn today(&self) -> Date;

    /// Current instant.
    fn now(&self) -> Timestamp;
}

/// Wall clock resolving the calendar date in a fixed time zone.
#[derive(Debug, Clone)]
pub struct SystemClock {
    time_zone: TimeZone,
}

impl SystemClock {
    #[must_use]
    pub fn new(time_zone: TimeZone) -> Self {
        Self { time_zone }
    }

    /// Clock in the host's local time zone.
    #[must_use]
    pub fn local() -> Self {
        Self::new(TimeZone::system())
    }

    #[must_use]
    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }
}

impl Clock for SystemClock {
    fn today(&self) -> Date {
        self.now().to_zoned(self.time_zone.clone()).date()
    }

    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}
