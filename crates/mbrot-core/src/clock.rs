#![forbid(unsafe_code)]

//! Monotonic time source for the frame budget.
//!
//! The scheduler only ever asks "how long since I started", so the trait
//! returns a [`Duration`] since an arbitrary fixed epoch. Tests drive the
//! scheduler with [`ManualClock`] to make suspension points deterministic.

use std::cell::Cell;
use std::time::Duration;

use web_time::Instant;

/// Monotonic elapsed-time source.
pub trait ScanClock {
    /// Time since this clock's epoch. Must never go backwards.
    fn now(&self) -> Duration;
}

impl<C: ScanClock + ?Sized> ScanClock for &C {
    #[inline]
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Wall clock backed by [`web_time::Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanClock for MonotonicClock {
    #[inline]
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// Hand-driven clock.
///
/// Every [`ScanClock::now`] call first returns the current reading and then
/// moves the clock forward by `step`, so a scheduler polling it sees time
/// pass at a fixed rate per poll.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
    step: Duration,
}

impl ManualClock {
    /// A frozen clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock that advances by `step` after every reading.
    #[must_use]
    pub fn with_step(step: Duration) -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
            step,
        }
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Current reading without stepping.
    #[must_use]
    pub fn peek(&self) -> Duration {
        self.now.get()
    }
}

impl ScanClock for ManualClock {
    fn now(&self) -> Duration {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}
