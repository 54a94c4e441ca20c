// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser console trace sink.

use alloc::format;
use alloc::string::String;

use folio_core::trace::{
    AccordionEvent, ActiveSectionEvent, AnchorEvent, FrameAdvanceEvent, HeaderEvent, MenuEvent,
    NavVisibilityEvent, RevealEvent, ScrollFrameEvent, TraceSink,
};
use wasm_bindgen::JsValue;
use web_sys::console;

/// A [`TraceSink`] that logs one `console.debug` line per event.
///
/// Scroll frames are frequent and skipped unless `scroll_frames` is set.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink {
    /// Log [`ScrollFrameEvent`]s.
    pub scroll_frames: bool,
}

fn log(line: String) {
    console::debug_1(&JsValue::from(line));
}

impl TraceSink for ConsoleSink {
    fn on_scroll_frame(&mut self, e: &ScrollFrameEvent) {
        if self.scroll_frames {
            log(format!(
                "[folio] scroll frame={} y={:.0} coalesced={}",
                e.frame_index, e.scroll_y, e.coalesced
            ));
        }
    }

    fn on_active_section(&mut self, e: &ActiveSectionEvent) {
        log(format!("[folio] section {:?} -> {:?}", e.from, e.to));
    }

    fn on_nav_visibility(&mut self, e: &NavVisibilityEvent) {
        log(format!(
            "[folio] mobile nav hidden={} at y={:.0}",
            e.hidden, e.scroll_y
        ));
    }

    fn on_header(&mut self, e: &HeaderEvent) {
        log(format!(
            "[folio] header scrolled={:?} back_to_top={:?}",
            e.scrolled, e.back_to_top
        ));
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        log(format!("[folio] reveal {:?} delay={:?}", e.id, e.delay));
    }

    fn on_frame_advance(&mut self, e: &FrameAdvanceEvent) {
        log(format!(
            "[folio] hero {} -> {} steps={}",
            e.from, e.to, e.steps
        ));
    }

    fn on_menu(&mut self, e: &MenuEvent) {
        log(format!("[folio] menu open={} cause={:?}", e.open, e.cause));
    }

    fn on_accordion(&mut self, e: &AccordionEvent) {
        log(format!("[folio] accordion {:?} open={}", e.id, e.open));
    }

    fn on_anchor(&mut self, e: &AnchorEvent<'_>) {
        log(format!(
            "[folio] anchor {:?} href={:?} top={:?}",
            e.kind, e.href, e.top
        ));
    }
}
