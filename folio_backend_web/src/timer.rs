// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `setInterval` and `setTimeout` wrappers.
//!
//! Both own their JS closure and clear the browser timer on drop. Callbacks
//! receive the host time at which they ran, read from `performance.now()`.

use alloc::boxed::Box;
use core::cell::Cell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use folio_core::time::{Duration, HostTime};

use crate::now;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setInterval")]
    fn set_interval(callback: &JsValue, ms: i32) -> i32;

    #[wasm_bindgen(js_name = "clearInterval")]
    fn clear_interval(id: i32);

    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, ms: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(id: i32);
}

/// Converts a duration to the whole milliseconds a browser timer takes.
fn timer_millis(d: Duration) -> i32 {
    i32::try_from(d.as_millis()).unwrap_or(i32::MAX)
}

/// A repeating browser timer.
pub struct IntervalTimer {
    _closure: Closure<dyn FnMut()>,
    id: i32,
}

impl IntervalTimer {
    /// Starts calling `callback` every `period`.
    pub fn start(period: Duration, mut callback: impl FnMut(HostTime) + 'static) -> Self {
        let closure = Closure::wrap(Box::new(move || callback(now())) as Box<dyn FnMut()>);
        let id = set_interval(closure.as_ref().unchecked_ref(), timer_millis(period));
        Self {
            _closure: closure,
            id,
        }
    }
}

impl Drop for IntervalTimer {
    fn drop(&mut self) {
        clear_interval(self.id);
    }
}

impl core::fmt::Debug for IntervalTimer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IntervalTimer")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// A re-armable single-shot browser timer.
///
/// Arming again replaces the pending run, so a burst of arms ends in one
/// callback after the last.
pub struct Timeout {
    closure: Closure<dyn FnMut()>,
    last: Cell<Option<i32>>,
}

impl Timeout {
    /// Creates an unarmed timeout that calls `callback` when it fires.
    pub fn new(mut callback: impl FnMut(HostTime) + 'static) -> Self {
        Self {
            closure: Closure::wrap(Box::new(move || callback(now())) as Box<dyn FnMut()>),
            last: Cell::new(None),
        }
    }

    /// Schedules one run after `delay`, replacing any pending run.
    pub fn arm(&self, delay: Duration) {
        self.cancel();
        let id = set_timeout(self.closure.as_ref().unchecked_ref(), timer_millis(delay));
        self.last.set(Some(id));
    }

    /// Cancels the pending run, if any.
    pub fn cancel(&self) {
        if let Some(id) = self.last.take() {
            clear_timeout(id);
        }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl core::fmt::Debug for Timeout {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Timeout")
            .field("last", &self.last.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_millis_truncates_and_clamps() {
        assert_eq!(timer_millis(Duration::from_millis(750)), 750);
        assert_eq!(timer_millis(Duration(250_900)), 250, "sub-millisecond part dropped");
        assert_eq!(
            timer_millis(Duration::from_millis(u64::from(u32::MAX))),
            i32::MAX,
            "out of range clamps"
        );
    }
}
