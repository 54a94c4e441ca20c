// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Injectable time source and fixed-period interval.
//!
//! Rules never read the wall clock themselves. A [`Clock`] hands out
//! [`HostTime`] values; in the browser that is `performance.now()`, in tests
//! a [`ManualClock`] that only moves when told to.
//!
//! [`Interval`] turns a stream of `now` samples into discrete ticks at a
//! fixed period. [`poll`](Interval::poll) reports how many periods fell due
//! since the last poll; [`tick`](Interval::tick) does the same for a host
//! timer callback, which always counts as at least one period.

use core::cell::Cell;

use crate::time::{Duration, HostTime};

/// A monotonic time source.
pub trait Clock {
    /// Returns the current host time.
    fn now(&self) -> HostTime;
}

/// A [`Clock`] that only advances when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<HostTime>,
}

impl ManualClock {
    /// Creates a clock reading `start`.
    #[must_use]
    pub fn new(start: HostTime) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Sets the clock to an absolute time.
    pub fn set(&self, to: HostTime) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> HostTime {
        self.now.get()
    }
}

/// Fixed-period tick generator.
#[derive(Clone, Copy, Debug)]
pub struct Interval {
    period: Duration,
    next_due: HostTime,
}

impl Interval {
    /// Creates an interval whose first tick is due one period after `start`.
    ///
    /// A zero period is bumped to one microsecond so [`poll`](Self::poll)
    /// always terminates.
    #[must_use]
    pub fn new(start: HostTime, period: Duration) -> Self {
        let period = if period == Duration::ZERO {
            Duration(1)
        } else {
            period
        };
        Self {
            period,
            next_due: start + period,
        }
    }

    /// Returns the configured period.
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns the time the next tick falls due.
    #[must_use]
    pub fn next_due(&self) -> HostTime {
        self.next_due
    }

    /// Returns how many ticks fell due at or before `now`, and schedules the
    /// next one.
    pub fn poll(&mut self, now: HostTime) -> u64 {
        if now < self.next_due {
            return 0;
        }
        let late = now.saturating_duration_since(self.next_due).micros();
        let due = late / self.period.micros() + 1;
        self.next_due = self.next_due + self.period.saturating_mul(due);
        due
    }

    /// Records a host timer callback at `now` and returns the periods it
    /// covers, never less than one.
    ///
    /// A callback delivered slightly early consumes the tick that was due,
    /// so the next callback is not reported as late.
    pub fn tick(&mut self, now: HostTime) -> u64 {
        match self.poll(now) {
            0 => {
                self.next_due = self.next_due + self.period;
                1
            }
            due => due,
        }
    }
}
