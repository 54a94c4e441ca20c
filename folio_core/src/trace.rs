// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing for the page reactor.
//!
//! Each rule reports its state transitions through a [`TraceSink`]. All sink
//! methods default to no-ops, so a sink implements only the events it cares
//! about.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. With the `trace`
//! feature **off** every `Tracer` method compiles to nothing; with it **on**
//! each call is one `Option` branch before dispatch.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies.

use crate::page::{AccordionId, RevealId, SectionId};
use crate::time::{Duration, HostTime};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Why the mobile menu changed state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuCause {
    /// Hamburger button.
    Toggle,
    /// A link inside the menu was followed.
    LinkClick,
    /// The window grew to the desktop breakpoint.
    Resize,
}

/// Which in-page navigation handler ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnchorKind {
    /// Fragment link scrolled to its target.
    Fragment,
    /// Fragment link left to the browser (empty, bare `#`, or no target).
    Passthrough,
    /// Back-to-top button.
    BackToTop,
    /// Skip link focused the main landmark.
    SkipLink,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once per animation frame that processed scroll input.
#[derive(Clone, Copy, Debug)]
pub struct ScrollFrameEvent {
    /// Monotonic count of processed scroll frames.
    pub frame_index: u64,
    /// Host time of the frame callback.
    pub now: HostTime,
    /// `scrollY` sampled for this frame.
    pub scroll_y: f64,
    /// Scroll events coalesced into this frame.
    pub coalesced: u32,
}

/// Emitted when the current section changes.
#[derive(Clone, Copy, Debug)]
pub struct ActiveSectionEvent {
    /// Host time of the change.
    pub now: HostTime,
    /// Previously current section.
    pub from: Option<SectionId>,
    /// Newly current section.
    pub to: Option<SectionId>,
    /// Links whose class was rewritten.
    pub links: u32,
}

/// Emitted when the mobile nav is hidden or shown.
#[derive(Clone, Copy, Debug)]
pub struct NavVisibilityEvent {
    /// Host time of the change.
    pub now: HostTime,
    /// New hidden flag.
    pub hidden: bool,
    /// `scrollY` that triggered the change.
    pub scroll_y: f64,
}

/// Emitted when the header scrolled state or the back-to-top button flips.
#[derive(Clone, Copy, Debug)]
pub struct HeaderEvent {
    /// Host time of the change.
    pub now: HostTime,
    /// Header shows its scrolled state, if that flipped.
    pub scrolled: Option<bool>,
    /// Back-to-top button shown, if that flipped.
    pub back_to_top: Option<bool>,
}

/// Emitted when an element fades in.
#[derive(Clone, Copy, Debug)]
pub struct RevealEvent {
    /// Host time of the observer callback.
    pub now: HostTime,
    /// Element revealed.
    pub id: RevealId,
    /// Transition delay it was given.
    pub delay: Duration,
}

/// Emitted when the hero frame changes.
#[derive(Clone, Copy, Debug)]
pub struct FrameAdvanceEvent {
    /// Host time of the timer callback.
    pub now: HostTime,
    /// Index before the tick.
    pub from: usize,
    /// Index after the tick.
    pub to: usize,
    /// Periods that elapsed; greater than one when the timer ran late.
    pub steps: u64,
}

/// Emitted when the mobile menu opens or closes.
#[derive(Clone, Copy, Debug)]
pub struct MenuEvent {
    /// Host time of the change.
    pub now: HostTime,
    /// New state.
    pub open: bool,
    /// What triggered it.
    pub cause: MenuCause,
}

/// Emitted when an accordion pair toggles.
#[derive(Clone, Copy, Debug)]
pub struct AccordionEvent {
    /// Host time of the click.
    pub now: HostTime,
    /// Pair toggled.
    pub id: AccordionId,
    /// New state.
    pub open: bool,
}

/// Emitted for every in-page navigation click.
#[derive(Clone, Copy, Debug)]
pub struct AnchorEvent<'a> {
    /// Host time of the click.
    pub now: HostTime,
    /// Handler that ran.
    pub kind: AnchorKind,
    /// `href` of the clicked link, empty for buttons.
    pub href: &'a str,
    /// Window offset scrolled to, if any.
    pub top: Option<f64>,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the reactor.
///
/// All methods have default no-op implementations.
pub trait TraceSink {
    /// Called after a scroll frame is processed.
    fn on_scroll_frame(&mut self, e: &ScrollFrameEvent) {
        _ = e;
    }

    /// Called when the current section changes.
    fn on_active_section(&mut self, e: &ActiveSectionEvent) {
        _ = e;
    }

    /// Called when the mobile nav hides or shows.
    fn on_nav_visibility(&mut self, e: &NavVisibilityEvent) {
        _ = e;
    }

    /// Called when the header or back-to-top state flips.
    fn on_header(&mut self, e: &HeaderEvent) {
        _ = e;
    }

    /// Called when an element is revealed.
    fn on_reveal(&mut self, e: &RevealEvent) {
        _ = e;
    }

    /// Called when the hero frame advances.
    fn on_frame_advance(&mut self, e: &FrameAdvanceEvent) {
        _ = e;
    }

    /// Called when the mobile menu changes state.
    fn on_menu(&mut self, e: &MenuEvent) {
        _ = e;
    }

    /// Called when an accordion toggles.
    fn on_accordion(&mut self, e: &AccordionEvent) {
        _ = e;
    }

    /// Called for in-page navigation clicks.
    fn on_anchor(&mut self, e: &AnchorEvent<'_>) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

macro_rules! emit {
    ($(#[$doc:meta])* $name:ident, $hook:ident, $event:ty) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self, e: &$event) {
            #[cfg(feature = "trace")]
            if let Some(s) = &mut self.sink {
                s.$hook(e);
            }
            #[cfg(not(feature = "trace"))]
            {
                _ = e;
            }
        }
    };
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    emit!(
        /// Emits a [`ScrollFrameEvent`].
        scroll_frame, on_scroll_frame, ScrollFrameEvent
    );
    emit!(
        /// Emits an [`ActiveSectionEvent`].
        active_section, on_active_section, ActiveSectionEvent
    );
    emit!(
        /// Emits a [`NavVisibilityEvent`].
        nav_visibility, on_nav_visibility, NavVisibilityEvent
    );
    emit!(
        /// Emits a [`HeaderEvent`].
        header, on_header, HeaderEvent
    );
    emit!(
        /// Emits a [`RevealEvent`].
        reveal, on_reveal, RevealEvent
    );
    emit!(
        /// Emits a [`FrameAdvanceEvent`].
        frame_advance, on_frame_advance, FrameAdvanceEvent
    );
    emit!(
        /// Emits a [`MenuEvent`].
        menu, on_menu, MenuEvent
    );
    emit!(
        /// Emits an [`AccordionEvent`].
        accordion, on_accordion, AccordionEvent
    );
    emit!(
        /// Emits an [`AnchorEvent`].
        anchor, on_anchor, AnchorEvent<'_>
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
