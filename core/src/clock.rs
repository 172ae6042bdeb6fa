//! Time source for the resolver.
//!
//! RULE: Nothing in the resolver reads the system time directly.
//! Shift activity and cache expiry are both judged against `Clock::now()`,
//! so a `ManualClock` makes every time-dependent decision reproducible.

use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: Cell::new(start) }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    /// Move forward by `by`. Returns the new instant.
    pub fn advance(&self, by: Duration) -> DateTime<Utc> {
        let next = self.now.get() + by;
        self.now.set(next);
        next
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}
