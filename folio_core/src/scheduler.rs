// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event coalescing: one scroll pass per animation frame, and trailing-edge
//! debounce for resize.
//!
//! Both types are plain state; the host owns the actual
//! `requestAnimationFrame` and `setTimeout` calls and consults these to decide
//! whether to schedule, and whether a callback that fired is still current.

use crate::time::{Duration, HostTime};

/// A granted frame from [`FrameGate::take`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTicket {
    /// Monotonic count of frames granted so far.
    pub frame_index: u64,
    /// Requests that were folded into this frame.
    pub coalesced: u32,
}

/// Single-flight frame request flag.
///
/// Any number of [`request`](Self::request) calls between two frames result
/// in exactly one scheduled frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameGate {
    pending: bool,
    coalesced: u32,
    frames: u64,
}

impl FrameGate {
    /// Creates an idle gate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: false,
            coalesced: 0,
            frames: 0,
        }
    }

    /// Records a request. Returns `true` when the caller must schedule a
    /// frame, `false` when one is already pending.
    pub fn request(&mut self) -> bool {
        self.coalesced = self.coalesced.saturating_add(1);
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Whether a frame is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consumes the pending frame. Returns `None` for a spurious callback.
    pub fn take(&mut self) -> Option<FrameTicket> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        let ticket = FrameTicket {
            frame_index: self.frames,
            coalesced: self.coalesced,
        };
        self.frames += 1;
        self.coalesced = 0;
        Some(ticket)
    }
}

/// Trailing-edge debounce.
///
/// Every [`trigger`](Self::trigger) pushes the deadline out; a timer that
/// fires before the current deadline is stale and [`fire`](Self::fire)
/// rejects it.
#[derive(Clone, Copy, Debug)]
pub struct Debounce {
    quiet: Duration,
    deadline: Option<HostTime>,
}

impl Debounce {
    /// Creates an idle debounce with the given quiet period.
    #[must_use]
    pub const fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Quiet period after the last trigger.
    #[must_use]
    pub const fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Records an event at `now`; returns the new deadline.
    pub fn trigger(&mut self, now: HostTime) -> HostTime {
        let deadline = now + self.quiet;
        self.deadline = Some(deadline);
        deadline
    }

    /// A timer fired at `now`. Returns `true` exactly once per burst, when
    /// the quiet period has elapsed since the last trigger.
    pub fn fire(&mut self, now: HostTime) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Whether a burst is waiting to settle.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_coalesces_until_taken() {
        let mut gate = FrameGate::new();
        assert!(gate.request(), "first request schedules");
        assert!(!gate.request(), "second request piggybacks");
        assert!(!gate.request());
        assert!(gate.is_pending());

        let ticket = gate.take().unwrap();
        assert_eq!(
            ticket,
            FrameTicket {
                frame_index: 0,
                coalesced: 3,
            }
        );
        assert_eq!(gate.take(), None, "nothing pending after take");

        assert!(gate.request(), "next frame schedules again");
        assert_eq!(gate.take().map(|t| t.frame_index), Some(1));
    }

    #[test]
    fn debounce_fires_once_after_last_trigger() {
        let quiet = Duration::from_millis(250);
        let mut d = Debounce::new(quiet);
        assert!(!d.fire(HostTime(0)), "idle");

        let _ = d.trigger(HostTime(0));
        let last = d.trigger(HostTime(100_000));
        assert_eq!(last, HostTime(350_000));

        assert!(!d.fire(HostTime(250_000)), "first timer is stale");
        assert!(d.is_armed());
        assert!(d.fire(HostTime(350_000)), "second timer settles");
        assert!(!d.fire(HostTime(400_000)), "only once");
        assert!(!d.is_armed());
    }
}
