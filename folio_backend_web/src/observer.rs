// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `IntersectionObserver` wrapper.
//!
//! [`Observer`] watches a fixed list of elements and reports each batch as
//! [`IntersectionEntry`] values keyed by the element's position in that
//! list, so the reactor never sees a DOM node.

use alloc::boxed::Box;
use alloc::vec::Vec;

use js_sys::Array;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use folio_core::geometry::{IntersectionEntry, RootMargin};

/// Observer options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverOptions {
    /// Visible fraction that counts as intersecting.
    pub threshold: f64,
    /// Viewport adjustment.
    pub margin: RootMargin,
}

type EntriesClosure = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// An `IntersectionObserver` over a fixed element list.
///
/// Disconnects on drop.
pub struct Observer {
    observer: IntersectionObserver,
    targets: Vec<Element>,
    _closure: EntriesClosure,
}

impl Observer {
    /// Starts observing `targets`. `id` turns a position in `targets` into
    /// the caller's id type; `callback` receives each non-empty batch.
    pub fn new<I: 'static>(
        targets: Vec<Element>,
        options: ObserverOptions,
        id: fn(usize) -> I,
        mut callback: impl FnMut(&[IntersectionEntry<I>]) + 'static,
    ) -> Result<Self, JsValue> {
        let lookup = targets.clone();
        let closure = Closure::wrap(Box::new(move |entries: Array, _: IntersectionObserver| {
            let batch: Vec<IntersectionEntry<I>> = entries
                .iter()
                .filter_map(|v| v.dyn_into::<IntersectionObserverEntry>().ok())
                .filter_map(|entry| {
                    let target = entry.target();
                    let index = lookup.iter().position(|el| *el == target)?;
                    Some(IntersectionEntry {
                        target: id(index),
                        is_intersecting: entry.is_intersecting(),
                    })
                })
                .collect();
            if !batch.is_empty() {
                callback(&batch);
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.margin.css());
        let observer =
            IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)?;
        for el in &targets {
            observer.observe(el);
        }
        Ok(Self {
            observer,
            targets,
            _closure: closure,
        })
    }

    /// Stops observing the element at `index`.
    pub fn unobserve(&self, index: usize) {
        if let Some(el) = self.targets.get(index) {
            self.observer.unobserve(el);
        }
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

impl core::fmt::Debug for Observer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Observer")
            .field("targets", &self.targets.len())
            .finish_non_exhaustive()
    }
}
