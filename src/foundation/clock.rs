use std::cell::Cell;

use chrono::{DateTime, Duration, Utc};

/// Source of UTC timestamps for entity stamping.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by [`Utc::now`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Hand-driven clock for deterministic tests and demos.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    /// Start the clock at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Jump to an absolute instant.
    pub fn set(&self, at: DateTime<Utc>) {
        self.now.set(at);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// `now`, bumped to one millisecond past `prev` when the clock has not moved far enough.
///
/// Keeps `updated_at` strictly increasing across back-to-back updates.
pub(crate) fn strictly_after(clock: &dyn Clock, prev: DateTime<Utc>) -> DateTime<Utc> {
    let now = clock.now();
    if now > prev {
        now
    } else {
        prev + Duration::milliseconds(1)
    }
}
