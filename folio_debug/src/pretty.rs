// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are printed in whole microseconds since page start.

use std::io::Write;

use folio_core::trace::{
    AccordionEvent, ActiveSectionEvent, AnchorEvent, AnchorKind, FrameAdvanceEvent, HeaderEvent,
    MenuCause, MenuEvent, NavVisibilityEvent, RevealEvent, ScrollFrameEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn flag(v: Option<bool>) -> &'static str {
    match v {
        Some(true) => "on",
        Some(false) => "off",
        None => "-",
    }
}

pub(crate) fn cause_name(cause: MenuCause) -> &'static str {
    match cause {
        MenuCause::Toggle => "toggle",
        MenuCause::LinkClick => "link",
        MenuCause::Resize => "resize",
    }
}

pub(crate) fn anchor_name(kind: AnchorKind) -> &'static str {
    match kind {
        AnchorKind::Fragment => "fragment",
        AnchorKind::Passthrough => "passthrough",
        AnchorKind::BackToTop => "back-to-top",
        AnchorKind::SkipLink => "skip-link",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_scroll_frame(&mut self, e: &ScrollFrameEvent) {
        let _ = writeln!(
            self.writer,
            "[scroll] frame={} now={}µs y={:.0} coalesced={}",
            e.frame_index,
            e.now.micros(),
            e.scroll_y,
            e.coalesced,
        );
    }

    fn on_active_section(&mut self, e: &ActiveSectionEvent) {
        let _ = writeln!(
            self.writer,
            "[section] now={}µs {:?} -> {:?} links={}",
            e.now.micros(),
            e.from,
            e.to,
            e.links,
        );
    }

    fn on_nav_visibility(&mut self, e: &NavVisibilityEvent) {
        let _ = writeln!(
            self.writer,
            "[nav] now={}µs {} at y={:.0}",
            e.now.micros(),
            if e.hidden { "hidden" } else { "shown" },
            e.scroll_y,
        );
    }

    fn on_header(&mut self, e: &HeaderEvent) {
        let _ = writeln!(
            self.writer,
            "[header] now={}µs scrolled={} back_to_top={}",
            e.now.micros(),
            flag(e.scrolled),
            flag(e.back_to_top),
        );
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        let _ = writeln!(
            self.writer,
            "[reveal] now={}µs {:?} delay={}ms",
            e.now.micros(),
            e.id,
            e.delay.as_millis(),
        );
    }

    fn on_frame_advance(&mut self, e: &FrameAdvanceEvent) {
        let _ = writeln!(
            self.writer,
            "[hero] now={}µs {} -> {} steps={}",
            e.now.micros(),
            e.from,
            e.to,
            e.steps,
        );
    }

    fn on_menu(&mut self, e: &MenuEvent) {
        let _ = writeln!(
            self.writer,
            "[menu] now={}µs {} cause={}",
            e.now.micros(),
            if e.open { "open" } else { "closed" },
            cause_name(e.cause),
        );
    }

    fn on_accordion(&mut self, e: &AccordionEvent) {
        let _ = writeln!(
            self.writer,
            "[accordion] now={}µs {:?} {}",
            e.now.micros(),
            e.id,
            if e.open { "open" } else { "closed" },
        );
    }

    fn on_anchor(&mut self, e: &AnchorEvent<'_>) {
        let _ = write!(
            self.writer,
            "[anchor] now={}µs {} href={:?}",
            e.now.micros(),
            anchor_name(e.kind),
            e.href,
        );
        let _ = match e.top {
            Some(top) => writeln!(self.writer, " top={top:.0}"),
            None => writeln!(self.writer),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::page::{RevealId, SectionId};
    use folio_core::time::{Duration, HostTime};

    fn lines(sink: PrettyPrintSink<Vec<u8>>) -> Vec<String> {
        String::from_utf8(sink.into_inner())
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn one_line_per_event() {
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        sink.on_scroll_frame(&ScrollFrameEvent {
            frame_index: 3,
            now: HostTime(16_000),
            scroll_y: 450.0,
            coalesced: 2,
        });
        sink.on_active_section(&ActiveSectionEvent {
            now: HostTime(16_000),
            from: Some(SectionId(0)),
            to: Some(SectionId(1)),
            links: 4,
        });
        sink.on_reveal(&RevealEvent {
            now: HostTime(20_000),
            id: RevealId(2),
            delay: Duration::from_millis(200),
        });

        let out = lines(sink);
        assert_eq!(out.len(), 3, "three events, three lines");
        assert_eq!(
            out[0], "[scroll] frame=3 now=16000µs y=450 coalesced=2",
            "scroll line"
        );
        assert_eq!(
            out[1], "[section] now=16000µs Some(SectionId(0)) -> Some(SectionId(1)) links=4",
            "section line"
        );
        assert_eq!(out[2], "[reveal] now=20000µs RevealId(2) delay=200ms");
    }

    #[test]
    fn anchor_line_shows_target_only_when_scrolled() {
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        sink.on_anchor(&AnchorEvent {
            now: HostTime(1_000),
            kind: AnchorKind::Fragment,
            href: "#work",
            top: Some(540.0),
        });
        sink.on_anchor(&AnchorEvent {
            now: HostTime(2_000),
            kind: AnchorKind::Passthrough,
            href: "#",
            top: None,
        });
        let out = lines(sink);
        assert_eq!(out[0], "[anchor] now=1000µs fragment href=\"#work\" top=540");
        assert_eq!(out[1], "[anchor] now=2000µs passthrough href=\"#\"");
    }

    #[test]
    fn header_flags_print_unchanged_as_dash() {
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        sink.on_header(&HeaderEvent {
            now: HostTime(0),
            scrolled: Some(true),
            back_to_top: None,
        });
        sink.on_menu(&MenuEvent {
            now: HostTime(5),
            open: false,
            cause: MenuCause::Resize,
        });
        let out = lines(sink);
        assert_eq!(out[0], "[header] now=0µs scrolled=on back_to_top=-");
        assert_eq!(out[1], "[menu] now=5µs closed cause=resize");
    }
}
