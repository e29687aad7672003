//! Time source for purchase and wishlist timestamps.
use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;
use std::fmt::Debug;

pub trait Clock: Debug {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Deterministic clock that moves forward by `step` on every read.
#[derive(Debug, Clone)]
pub struct SteppingClock {
    current: Cell<DateTime<Utc>>,
    step: Duration,
}

impl SteppingClock {
    #[must_use]
    pub const fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            current: Cell::new(start),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let now = self.current.get();
        self.current.set(now + self.step);
        now
    }
}
