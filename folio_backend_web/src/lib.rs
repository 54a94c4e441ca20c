// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for folio.
//!
//! This crate connects the pure rules in `folio_core` to a browser page:
//!
//! - [`scan`]: builds a [`PageLayout`](folio_core::page::PageLayout) and an
//!   element [`Registry`] from the document
//! - [`DomPresenter`]: applies effects to the registered elements
//! - [`FrameRequest`]: one-shot `requestAnimationFrame` callback
//! - [`IntervalTimer`] / [`Timeout`]: `setInterval` / `setTimeout`
//! - [`Observer`]: `IntersectionObserver` keyed by element position
//! - [`ConsoleSink`]: trace events on the browser console

#![no_std]

extern crate alloc;

mod console;
mod dom;
mod observer;
mod presenter;
mod raf;
mod timer;

pub use console::ConsoleSink;
pub use dom::{Registry, fragment_target_top, inject_stylesheet, scan};
pub use folio_core::backend::Presenter;
pub use observer::{Observer, ObserverOptions};
pub use presenter::DomPresenter;
pub use raf::FrameRequest;
pub use timer::{IntervalTimer, Timeout};

use folio_core::geometry::Viewport;
use folio_core::time::HostTime;
use web_sys::Window;

/// Returns the current host time from `performance.now()`.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(raf::performance_now())
}

/// Samples `scrollY` and the inner window size.
#[must_use]
pub fn viewport(window: &Window) -> Viewport {
    let px = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    Viewport::new(
        window.scroll_y().unwrap_or(0.0),
        px(window.inner_width()),
        px(window.inner_height()),
    )
}

/// Whether the user asked for reduced motion.
#[must_use]
pub fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .is_some_and(|mq| mq.matches())
}
