// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-driven chrome: sticky header, hide-on-scroll mobile nav, and the
//! back-to-top button.

use alloc::vec::Vec;

use crate::config::NavConfig;
use crate::effect::{Effect, Target};
use crate::geometry::Viewport;

/// A boolean flag mirrored onto a class, emitting only on change.
#[derive(Clone, Copy, Debug, Default)]
struct ClassFlag {
    on: Option<bool>,
}

impl ClassFlag {
    fn set(&mut self, on: bool, target: Target, class: &'static str, out: &mut Vec<Effect>) {
        if self.on != Some(on) {
            self.on = Some(on);
            out.push(Effect::class(target, class, on));
        }
    }

    fn get(self) -> bool {
        self.on.unwrap_or(false)
    }
}

/// Hide-on-scroll state of the mobile nav.
///
/// `last_scroll_y` is updated on every sample, including samples taken while
/// the viewport is too wide for the rule to apply, so a later narrow sample
/// never sees a stale delta. Wide samples go through [`reset`](Self::reset)
/// and never hide.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollDirection {
    /// Offset of the previous sample.
    pub last_scroll_y: f64,
    /// Whether the mobile nav is hidden.
    pub hidden: bool,
}

impl ScrollDirection {
    /// Feeds one sample; returns the new hidden flag.
    pub fn sample(&mut self, scroll_y: f64, config: &NavConfig) -> bool {
        let diff = scroll_y - self.last_scroll_y;
        if diff > config.hysteresis && scroll_y > config.min_hide_offset {
            self.hidden = true;
        } else if diff < -config.hysteresis {
            self.hidden = false;
        }
        self.last_scroll_y = scroll_y;
        self.hidden
    }

    /// Records the offset and clears the hidden flag.
    pub fn reset(&mut self, scroll_y: f64) {
        self.last_scroll_y = scroll_y;
        self.hidden = false;
    }
}

/// What changed in a scroll sample, for tracing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavChange {
    /// Header scrolled flag flipped.
    pub header: Option<bool>,
    /// Mobile nav hidden flag flipped.
    pub mobile_nav_hidden: Option<bool>,
    /// Back-to-top visibility flipped.
    pub back_to_top: Option<bool>,
}

/// Header, mobile nav and back-to-top state.
#[derive(Clone, Debug)]
pub struct NavRule {
    config: NavConfig,
    has_header: bool,
    has_mobile_nav: bool,
    has_back_to_top: bool,
    direction: ScrollDirection,
    header: ClassFlag,
    mobile_nav: ClassFlag,
    back_to_top: ClassFlag,
}

impl NavRule {
    /// Creates the rule. Missing elements make their part inert.
    #[must_use]
    pub fn new(
        config: NavConfig,
        has_header: bool,
        has_mobile_nav: bool,
        has_back_to_top: bool,
    ) -> Self {
        Self {
            config,
            has_header,
            has_mobile_nav,
            has_back_to_top,
            direction: ScrollDirection::default(),
            header: ClassFlag::default(),
            mobile_nav: ClassFlag::default(),
            back_to_top: ClassFlag::default(),
        }
    }

    /// Whether the header shows its scrolled state.
    #[must_use]
    pub fn header_scrolled(&self) -> bool {
        self.header.get()
    }

    /// Whether the mobile nav is hidden.
    #[must_use]
    pub fn mobile_nav_hidden(&self) -> bool {
        self.mobile_nav.get()
    }

    /// Whether the back-to-top button is shown.
    #[must_use]
    pub fn back_to_top_visible(&self) -> bool {
        self.back_to_top.get()
    }

    /// Handles one (frame-coalesced) scroll sample.
    pub fn on_scroll(&mut self, viewport: Viewport) -> (Vec<Effect>, NavChange) {
        let before = self.snapshot();
        let mut effects = Vec::new();
        let y = viewport.scroll_y;

        if self.has_header {
            self.header.set(
                y > self.config.header_threshold,
                Target::Header,
                self.config.header_scrolled_class,
                &mut effects,
            );
        }

        if self.has_mobile_nav {
            let hidden = if viewport.is_narrow(self.config.mobile_breakpoint) {
                self.direction.sample(y, &self.config)
            } else {
                self.direction.reset(y);
                false
            };
            self.mobile_nav.set(
                hidden,
                Target::MobileNav,
                self.config.hidden_class,
                &mut effects,
            );
        }

        if self.has_back_to_top {
            self.back_to_top.set(
                y > self.config.back_to_top_threshold,
                Target::BackToTop,
                self.config.back_to_top_class,
                &mut effects,
            );
        }

        (effects, self.diff(before))
    }

    /// Handles a (debounced) resize. Growing past the breakpoint forces the
    /// mobile nav visible and resets its direction state.
    pub fn on_resize(&mut self, viewport: Viewport) -> (Vec<Effect>, NavChange) {
        let before = self.snapshot();
        let mut effects = Vec::new();
        if self.has_mobile_nav && !viewport.is_narrow(self.config.mobile_breakpoint) {
            self.direction.reset(viewport.scroll_y);
            self.mobile_nav.set(
                false,
                Target::MobileNav,
                self.config.hidden_class,
                &mut effects,
            );
        }
        (effects, self.diff(before))
    }

    fn snapshot(&self) -> [Option<bool>; 3] {
        [self.header.on, self.mobile_nav.on, self.back_to_top.on]
    }

    fn diff(&self, before: [Option<bool>; 3]) -> NavChange {
        let flip = |old: Option<bool>, new: Option<bool>| if old == new { None } else { new };
        NavChange {
            header: flip(before[0], self.header.on),
            mobile_nav_hidden: flip(before[1], self.mobile_nav.on),
            back_to_top: flip(before[2], self.back_to_top.on),
        }
    }
}
