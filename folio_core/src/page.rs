// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page layout snapshot and element identity types.
//!
//! The DOM adapter scans the document once at startup and describes what it
//! found as a [`PageLayout`]. Each collection is indexed by a small id type;
//! an id is the element's position in document order within its collection.
//! Absent optional elements show up as `false` / `None` here, which is how
//! features become inert.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;

macro_rules! index_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $name {
            /// Returns the position in document order.
            #[inline]
            #[must_use]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// The id of the element at `index` in document order.
            #[inline]
            #[must_use]
            pub const fn from_index(index: usize) -> Self {
                Self(id_value(index))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

index_id!(
    /// A `section[id]` element.
    SectionId
);
index_id!(
    /// A navigation link in either the desktop or the mobile set.
    LinkId
);
index_id!(
    /// An element that fades in on first intersection.
    RevealId
);
index_id!(
    /// An accordion trigger/panel pair.
    AccordionId
);
index_id!(
    /// A pre-rendered hero frame element.
    FrameId
);

/// Converts a collection position into an id value.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "a page never holds 2^32 elements of one kind"
)]
pub(crate) const fn id_value(index: usize) -> u32 {
    index as u32
}

/// A section and where it sits in the document.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionInfo {
    /// The element `id`, without `#`.
    pub anchor: String,
    /// Document-space bounds (`offsetTop`, `offsetHeight`).
    pub bounds: Rect,
}

impl SectionInfo {
    /// Creates a full-width section at `top` with the given `height`.
    #[must_use]
    pub fn new(anchor: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            anchor: anchor.into(),
            bounds: Rect::new(0.0, top, 0.0, top + height),
        }
    }

    /// Top offset in the document.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.bounds.y0
    }

    /// Height in CSS pixels.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bounds.height()
    }
}

/// Which navigation collection a link belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinkSet {
    /// Header links (`.nav-link`).
    Desktop,
    /// Mobile menu links (`.mobile-menu-link`).
    Mobile,
}

/// A navigation link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkInfo {
    /// Raw `href` attribute.
    pub href: String,
    /// Collection the link came from.
    pub set: LinkSet,
}

impl LinkInfo {
    /// Creates a link description.
    #[must_use]
    pub fn new(href: impl Into<String>, set: LinkSet) -> Self {
        Self {
            href: href.into(),
            set,
        }
    }

    /// Whether this link targets the section with the given anchor.
    #[must_use]
    pub fn points_at(&self, anchor: &str) -> bool {
        self.href.strip_prefix('#') == Some(anchor)
    }
}

/// Stagger policy group of a reveal element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevealGroup {
    /// Generic cards, staggered cyclically.
    Card,
    /// Client logos, staggered sequentially.
    Logo,
}

/// What the hero animation has to work with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum HeroSurface {
    /// No hero element on the page.
    #[default]
    Absent,
    /// A single `<img>` whose `src` is swapped.
    Image {
        /// The enclosing `<picture>` has a `source[type="image/webp"]`.
        webp: bool,
    },
    /// Pre-rendered elements, each tagged with its frame name.
    Elements {
        /// `data-frame` value of each element, in document order.
        tags: Vec<String>,
    },
}

/// Everything the rules need to know about the document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageLayout {
    /// Sections in document order.
    pub sections: Vec<SectionInfo>,
    /// Desktop links followed by mobile links.
    pub links: Vec<LinkInfo>,
    /// Group of each reveal element, cards first, then logos.
    pub reveals: Vec<RevealGroup>,
    /// Initial `aria-expanded` state of each accordion trigger.
    pub accordions: Vec<bool>,
    /// Hero animation surface.
    pub hero: HeroSurface,
    /// Sticky header is present.
    pub has_header: bool,
    /// Fixed mobile navigation bar is present.
    pub has_mobile_nav: bool,
    /// Menu toggle and panel are both present.
    pub has_menu: bool,
    /// Back-to-top button is present.
    pub has_back_to_top: bool,
    /// Main landmark is present.
    pub has_main: bool,
}

impl PageLayout {
    /// Looks up a section by its anchor.
    #[must_use]
    pub fn section_by_anchor(&self, anchor: &str) -> Option<SectionId> {
        self.sections
            .iter()
            .position(|s| s.anchor == anchor)
            .map(|i| SectionId(id_value(i)))
    }

    /// Links of the given set.
    pub fn links_in(&self, set: LinkSet) -> impl Iterator<Item = LinkId> + '_ {
        self.links
            .iter()
            .enumerate()
            .filter(move |(_, l)| l.set == set)
            .map(|(i, _)| LinkId(id_value(i)))
    }
}
