// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event as an
//! owned [`RecordedEvent`], in arrival order. Borrowed fields (the `href` of
//! an [`AnchorEvent`]) are copied.

use folio_core::trace::{
    AccordionEvent, ActiveSectionEvent, AnchorEvent, AnchorKind, FrameAdvanceEvent, HeaderEvent,
    MenuEvent, NavVisibilityEvent, RevealEvent, ScrollFrameEvent, TraceSink,
};
use folio_core::time::HostTime;

/// An owned copy of an [`AnchorEvent`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedAnchor {
    /// Host time of the click.
    pub now: HostTime,
    /// Handler that ran.
    pub kind: AnchorKind,
    /// `href` of the clicked link.
    pub href: String,
    /// Window offset scrolled to, if any.
    pub top: Option<f64>,
}

/// A recorded trace event.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`ScrollFrameEvent`].
    ScrollFrame(ScrollFrameEvent),
    /// An [`ActiveSectionEvent`].
    ActiveSection(ActiveSectionEvent),
    /// A [`NavVisibilityEvent`].
    NavVisibility(NavVisibilityEvent),
    /// A [`HeaderEvent`].
    Header(HeaderEvent),
    /// A [`RevealEvent`].
    Reveal(RevealEvent),
    /// A [`FrameAdvanceEvent`].
    FrameAdvance(FrameAdvanceEvent),
    /// A [`MenuEvent`].
    Menu(MenuEvent),
    /// An [`AccordionEvent`].
    Accordion(AccordionEvent),
    /// An [`AnchorEvent`].
    Anchor(RecordedAnchor),
}

impl RecordedEvent {
    /// Host time the event carries.
    #[must_use]
    pub fn now(&self) -> HostTime {
        match self {
            Self::ScrollFrame(e) => e.now,
            Self::ActiveSection(e) => e.now,
            Self::NavVisibility(e) => e.now,
            Self::Header(e) => e.now,
            Self::Reveal(e) => e.now,
            Self::FrameAdvance(e) => e.now,
            Self::Menu(e) => e.now,
            Self::Accordion(e) => e.now,
            Self::Anchor(e) => e.now,
        }
    }

    /// Short event name, as used in exports.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ScrollFrame(_) => "ScrollFrame",
            Self::ActiveSection(_) => "ActiveSection",
            Self::NavVisibility(_) => "NavVisibility",
            Self::Header(_) => "Header",
            Self::Reveal(_) => "Reveal",
            Self::FrameAdvance(_) => "FrameAdvance",
            Self::Menu(_) => "Menu",
            Self::Accordion(_) => "Accordion",
            Self::Anchor(_) => "Anchor",
        }
    }
}

/// A [`TraceSink`] that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Drops everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl TraceSink for RecorderSink {
    fn on_scroll_frame(&mut self, e: &ScrollFrameEvent) {
        self.events.push(RecordedEvent::ScrollFrame(*e));
    }

    fn on_active_section(&mut self, e: &ActiveSectionEvent) {
        self.events.push(RecordedEvent::ActiveSection(*e));
    }

    fn on_nav_visibility(&mut self, e: &NavVisibilityEvent) {
        self.events.push(RecordedEvent::NavVisibility(*e));
    }

    fn on_header(&mut self, e: &HeaderEvent) {
        self.events.push(RecordedEvent::Header(*e));
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        self.events.push(RecordedEvent::Reveal(*e));
    }

    fn on_frame_advance(&mut self, e: &FrameAdvanceEvent) {
        self.events.push(RecordedEvent::FrameAdvance(*e));
    }

    fn on_menu(&mut self, e: &MenuEvent) {
        self.events.push(RecordedEvent::Menu(*e));
    }

    fn on_accordion(&mut self, e: &AccordionEvent) {
        self.events.push(RecordedEvent::Accordion(*e));
    }

    fn on_anchor(&mut self, e: &AnchorEvent<'_>) {
        self.events.push(RecordedEvent::Anchor(RecordedAnchor {
            now: e.now,
            kind: e.kind,
            href: e.href.to_owned(),
            top: e.top,
        }));
    }
}
