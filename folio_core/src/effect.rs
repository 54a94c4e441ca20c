// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM mutation requests produced by the rules.
//!
//! Rules never touch the document. They return [`Effect`] values naming a
//! [`Target`] symbolically; a [`Presenter`](crate::backend::Presenter) maps
//! targets to live elements and performs the mutation. Effects within one
//! list must be applied in order.

use alloc::string::String;
use alloc::vec::Vec;

use crate::page::{AccordionId, FrameId, LinkId, RevealId};

/// Which element an [`Effect`] applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// `document.body`.
    Body,
    /// The sticky header.
    Header,
    /// The fixed mobile navigation bar.
    MobileNav,
    /// The hamburger button.
    MenuToggle,
    /// The slide-out mobile menu panel.
    MobileMenu,
    /// A navigation link (desktop or mobile set).
    NavLink(LinkId),
    /// An element with a fade-in reveal.
    Reveal(RevealId),
    /// An accordion trigger.
    AccordionTrigger(AccordionId),
    /// The panel an accordion trigger controls.
    AccordionPanel(AccordionId),
    /// A pre-rendered hero frame element.
    Frame(FrameId),
    /// The back-to-top button.
    BackToTop,
    /// The main content landmark.
    Main,
}

/// Whether a scroll animates or jumps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollBehavior {
    /// Animated scroll.
    Smooth,
    /// Immediate jump.
    Instant,
}

impl ScrollBehavior {
    /// Smooth unless the user prefers reduced motion.
    #[must_use]
    pub const fn for_motion(reduced_motion: bool) -> Self {
        if reduced_motion {
            Self::Instant
        } else {
            Self::Smooth
        }
    }

    /// The CSSOM `behavior` keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Smooth => "smooth",
            Self::Instant => "auto",
        }
    }
}

/// A single DOM mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// `classList.add`.
    AddClass {
        /// Element to mutate.
        target: Target,
        /// Class name.
        class: &'static str,
    },
    /// `classList.remove`.
    RemoveClass {
        /// Element to mutate.
        target: Target,
        /// Class name.
        class: &'static str,
    },
    /// `setAttribute`.
    SetAttribute {
        /// Element to mutate.
        target: Target,
        /// Attribute name.
        name: &'static str,
        /// New value.
        value: String,
    },
    /// `removeAttribute`.
    RemoveAttribute {
        /// Element to mutate.
        target: Target,
        /// Attribute name.
        name: &'static str,
    },
    /// `style.setProperty`; an empty value removes the property.
    SetStyle {
        /// Element to mutate.
        target: Target,
        /// CSS property name.
        property: &'static str,
        /// CSS value.
        value: String,
    },
    /// `window.scrollTo({ top, behavior })`.
    ScrollWindowTo {
        /// Document offset to scroll to.
        top: f64,
        /// Animation mode.
        behavior: ScrollBehavior,
    },
    /// `scrollIntoView({ inline: "center", block: "nearest", behavior })`.
    CenterInContainer {
        /// Element to bring into view.
        target: Target,
        /// Animation mode.
        behavior: ScrollBehavior,
    },
    /// `history.pushState(null, "", fragment)`.
    PushFragment(String),
    /// `focus()`.
    Focus(Target),
    /// Swap the hero image source (and its webp `<source>` when present).
    SetHeroSource(String),
    /// Stop observing an element for intersection.
    Unobserve(Target),
}

impl Effect {
    /// Shorthand for [`Effect::AddClass`] or [`Effect::RemoveClass`].
    #[must_use]
    pub const fn class(target: Target, class: &'static str, on: bool) -> Self {
        if on {
            Self::AddClass { target, class }
        } else {
            Self::RemoveClass { target, class }
        }
    }

    /// The element this effect mutates, if it targets one.
    #[must_use]
    pub const fn target(&self) -> Option<Target> {
        match self {
            Self::AddClass { target, .. }
            | Self::RemoveClass { target, .. }
            | Self::SetAttribute { target, .. }
            | Self::RemoveAttribute { target, .. }
            | Self::SetStyle { target, .. }
            | Self::CenterInContainer { target, .. }
            | Self::Focus(target)
            | Self::Unobserve(target) => Some(*target),
            Self::ScrollWindowTo { .. } | Self::PushFragment(_) | Self::SetHeroSource(_) => None,
        }
    }
}

/// Effects returned by a rule, plus whether the triggering event's default
/// action must be cancelled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reaction {
    /// Mutations to apply, in order.
    pub effects: Vec<Effect>,
    /// Call `preventDefault()` on the originating event.
    pub prevent_default: bool,
}

impl Reaction {
    /// A reaction that does nothing.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            effects: Vec::new(),
            prevent_default: false,
        }
    }

    /// A reaction that cancels the default action and applies `effects`.
    #[must_use]
    pub fn handled(effects: Vec<Effect>) -> Self {
        Self {
            effects,
            prevent_default: true,
        }
    }

    /// Whether nothing would happen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty() && !self.prevent_default
    }
}

impl From<Vec<Effect>> for Reaction {
    fn from(effects: Vec<Effect>) -> Self {
        Self {
            effects,
            prevent_default: false,
        }
    }
}
