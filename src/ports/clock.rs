//! Clock Port - source of the current time for time-of-day greetings.

use crate::domain::foundation::Timestamp;

/// Port for reading the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;

    /// Hour of day (0-23) used for greetings.
    fn local_hour(&self) -> u32 {
        self.now().local_hour()
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Clock pinned to one hour of the day.
#[derive(Debug, Clone, Copy)]
pub struct FixedHourClock(pub u32);

impl Clock for FixedHourClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    fn local_hour(&self) -> u32 {
        self.0
    }
}
