// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `requestAnimationFrame` frame source.
//!
//! [`FrameRequest`] registers one JS closure up front and hands it to
//! `requestAnimationFrame` each time [`request`](FrameRequest::request) is
//! called. It does not re-arm itself: scroll work runs only in frames that
//! something asked for, and the caller decides (through
//! [`FrameGate`](folio_core::scheduler::FrameGate)) whether to ask.
//!
//! Each callback receives a [`DOMHighResTimeStamp`][mdn] (milliseconds from
//! `performance.now()`), converted to microsecond [`HostTime`].
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/DOMHighResTimeStamp

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use folio_core::time::HostTime;

// Direct global bindings instead of `web_sys::Window` methods; avoids
// fetching the Window/Performance objects on every scroll event.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

type RafClosure = Closure<dyn FnMut(f64)>;

struct RafInner {
    closure: RefCell<Option<RafClosure>>,
    callback: RefCell<Box<dyn FnMut(HostTime)>>,
    pending: Cell<Option<i32>>,
}

/// A reusable one-shot `requestAnimationFrame` callback.
///
/// Dropping the request cancels a pending frame and releases the closure.
pub struct FrameRequest {
    inner: Rc<RafInner>,
}

impl FrameRequest {
    /// Creates a request that calls `callback` with the frame timestamp.
    /// Nothing is scheduled until [`request`](Self::request).
    pub fn new(callback: impl FnMut(HostTime) + 'static) -> Self {
        let inner = Rc::new(RafInner {
            closure: RefCell::new(None),
            callback: RefCell::new(Box::new(callback)),
            pending: Cell::new(None),
        });

        let weak = Rc::downgrade(&inner);
        let closure = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.pending.set(None);
            inner.callback.borrow_mut()(HostTime::from_millis_f64(timestamp_ms));
        }) as Box<dyn FnMut(f64)>);
        *inner.closure.borrow_mut() = Some(closure);

        Self { inner }
    }

    /// Schedules the callback for the next frame. A second call before the
    /// frame runs is a no-op.
    pub fn request(&self) {
        if self.inner.pending.get().is_some() {
            return;
        }
        if let Some(ref closure) = *self.inner.closure.borrow() {
            let id = request_animation_frame(closure.as_ref().unchecked_ref());
            self.inner.pending.set(Some(id));
        }
    }

    /// Whether a frame is scheduled and has not run yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.pending.get().is_some()
    }

    /// Cancels the scheduled frame, if any.
    pub fn cancel(&self) {
        if let Some(id) = self.inner.pending.take() {
            cancel_animation_frame(id);
        }
    }
}

impl Drop for FrameRequest {
    fn drop(&mut self) {
        self.cancel();
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for FrameRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameRequest")
            .field("pending", &self.inner.pending.get())
            .finish_non_exhaustive()
    }
}
