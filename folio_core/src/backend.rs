// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for hosting the reactor.
//!
//! A backend crate supplies:
//!
//! - **Time**: a `now() -> HostTime` free function reading the host's
//!   monotonic clock, or any [`Clock`](crate::clock::Clock).
//! - **Layout scan**: builds a [`PageLayout`](crate::page::PageLayout) from
//!   the document and remembers which element each id refers to.
//! - **Presenter**: implements [`Presenter`] to turn [`Effect`]s into DOM
//!   mutations.
//! - **Event wiring**: forwards scroll, resize, click and observer events to
//!   the [`Reactor`](crate::reactor::Reactor).
//!
//! Event wiring stays backend-specific; setup and listener lifetimes differ
//! too much between hosts to share behind a trait.

use alloc::vec::Vec;

use crate::effect::Effect;

/// Applies reactor effects to a presentation tree.
///
/// The DOM presenter and test doubles both implement this.
///
/// ```rust,ignore
/// fn on_scroll_frame(now: HostTime) {
///     let effects = reactor.on_scroll_frame(now, viewport(), &mut tracer);
///     presenter.apply(&effects);
/// }
/// ```
pub trait Presenter {
    /// Applies `effects` in order.
    fn apply(&mut self, effects: &[Effect]);
}

/// A [`Presenter`] that keeps every effect it was given.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresenter {
    /// Effects applied so far, in order.
    pub applied: Vec<Effect>,
}

impl Presenter for RecordingPresenter {
    fn apply(&mut self, effects: &[Effect]) {
        self.applied.extend_from_slice(effects);
    }
}
