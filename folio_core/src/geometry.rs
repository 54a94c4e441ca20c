// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport geometry and intersection margins.
//!
//! Layout is carried as [`kurbo::Rect`] in document coordinates (y grows
//! downward, origin at the top of the page). [`RootMargin`] mirrors the CSS
//! `rootMargin` of an `IntersectionObserver`: positive values grow the
//! viewport, negative values shrink it, percentages resolve against the
//! viewport size.

use alloc::format;
use alloc::string::String;

use kurbo::{Insets, Rect};

/// Current viewport: scroll offset plus client size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Vertical scroll offset (`window.scrollY`).
    pub scroll_y: f64,
    /// Inner width of the window in CSS pixels.
    pub width: f64,
    /// Inner height of the window in CSS pixels.
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport sample.
    #[must_use]
    pub const fn new(scroll_y: f64, width: f64, height: f64) -> Self {
        Self {
            scroll_y,
            width,
            height,
        }
    }

    /// The visible region in document coordinates.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.scroll_y + self.height)
    }

    /// Whether the width is at or below `breakpoint`.
    #[must_use]
    pub fn is_narrow(&self, breakpoint: f64) -> bool {
        self.width <= breakpoint
    }
}

/// One side of a [`RootMargin`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarginValue {
    /// Absolute CSS pixels.
    Px(f64),
    /// Percentage of the viewport extent along that axis.
    Percent(f64),
}

impl MarginValue {
    fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Px(px) => px,
            Self::Percent(pct) => extent * pct / 100.0,
        }
    }

    fn css(self) -> String {
        match self {
            Self::Px(px) => format!("{px}px"),
            Self::Percent(pct) => format!("{pct}%"),
        }
    }
}

/// Grow/shrink applied to the viewport before an intersection test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootMargin {
    /// Top side.
    pub top: MarginValue,
    /// Right side.
    pub right: MarginValue,
    /// Bottom side.
    pub bottom: MarginValue,
    /// Left side.
    pub left: MarginValue,
}

impl RootMargin {
    /// No adjustment.
    pub const ZERO: Self = Self {
        top: MarginValue::Px(0.0),
        right: MarginValue::Px(0.0),
        bottom: MarginValue::Px(0.0),
        left: MarginValue::Px(0.0),
    };

    /// Creates a margin from its four sides in CSS order.
    #[must_use]
    pub const fn new(
        top: MarginValue,
        right: MarginValue,
        bottom: MarginValue,
        left: MarginValue,
    ) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Applies the margin to a viewport rectangle.
    #[must_use]
    pub fn apply(&self, root: Rect) -> Rect {
        let w = root.width();
        let h = root.height();
        root.inset(Insets::new(
            self.left.resolve(w),
            self.top.resolve(h),
            self.right.resolve(w),
            self.bottom.resolve(h),
        ))
    }

    /// Formats the margin as a CSS `rootMargin` string.
    #[must_use]
    pub fn css(&self) -> String {
        format!(
            "{} {} {} {}",
            self.top.css(),
            self.right.css(),
            self.bottom.css(),
            self.left.css()
        )
    }
}

/// One observer report: which element, and whether it now intersects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntersectionEntry<I> {
    /// Observed element.
    pub target: I,
    /// `IntersectionObserverEntry.isIntersecting`.
    pub is_intersecting: bool,
}

impl<I> IntersectionEntry<I> {
    /// An entry reporting that `target` entered the root.
    #[must_use]
    pub const fn entered(target: I) -> Self {
        Self {
            target,
            is_intersecting: true,
        }
    }

    /// An entry reporting that `target` left the root.
    #[must_use]
    pub const fn left(target: I) -> Self {
        Self {
            target,
            is_intersecting: false,
        }
    }
}

/// Fraction of `target` that lies inside `root`, in `0.0..=1.0`.
///
/// A zero-area target counts as fully visible when it touches `root`, the
/// way `IntersectionObserver` treats empty elements.
#[must_use]
pub fn intersection_ratio(root: Rect, target: Rect) -> f64 {
    if !touches(root, target) {
        return 0.0;
    }
    let area = target.area();
    if area <= 0.0 {
        return 1.0;
    }
    (root.intersect(target).area() / area).clamp(0.0, 1.0)
}

/// Whether `target` intersects `root` with at least `threshold` of its area.
///
/// A threshold of zero accepts edge contact, as the browser does.
#[must_use]
pub fn is_intersecting(root: Rect, target: Rect, threshold: f64) -> bool {
    if !touches(root, target) {
        return false;
    }
    threshold <= 0.0 || intersection_ratio(root, target) >= threshold
}

fn touches(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}
