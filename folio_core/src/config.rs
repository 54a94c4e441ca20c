// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page configuration.
//!
//! [`PageConfig::portfolio`] is the preset for the portfolio page; every
//! threshold, breakpoint, selector and class name the rules and the DOM
//! adapter use lives here. Fields are public so a page can adjust a copy of
//! the preset before building the [`Reactor`](crate::reactor::Reactor).

use crate::geometry::{MarginValue, RootMargin};
use crate::reveal::Stagger;
use crate::time::Duration;

/// How the current section is determined.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActiveStrategy {
    /// Compare `scrollY` against each section's window on every scroll frame.
    ScrollPosition {
        /// Lookahead so the next section activates before it reaches the top.
        lookahead: f64,
    },
    /// Mark a section active whenever it intersects the shrunk viewport.
    Intersection {
        /// Viewport adjustment for the observer.
        margin: RootMargin,
    },
}

/// Active-section tracking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionConfig {
    /// Detection strategy.
    pub strategy: ActiveStrategy,
    /// Class toggled on matching links.
    pub active_class: &'static str,
}

/// Header shadow, mobile nav hide-on-scroll, back-to-top visibility.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavConfig {
    /// `scrollY` above which the header gets its scrolled class.
    pub header_threshold: f64,
    /// Class added to the header once scrolled.
    pub header_scrolled_class: &'static str,
    /// Minimum per-sample delta before the mobile nav changes state.
    pub hysteresis: f64,
    /// The mobile nav never hides above this offset.
    pub min_hide_offset: f64,
    /// Widths at or below this are mobile.
    pub mobile_breakpoint: f64,
    /// Class added to the mobile nav while hidden.
    pub hidden_class: &'static str,
    /// `scrollY` above which the back-to-top button shows.
    pub back_to_top_threshold: f64,
    /// Class added to the back-to-top button while shown.
    pub back_to_top_class: &'static str,
}

/// Fade-in reveal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealConfig {
    /// Fraction of an element that must be visible.
    pub threshold: f64,
    /// Viewport adjustment for the observer.
    pub margin: RootMargin,
    /// Initial downward offset in pixels.
    pub offset_px: f64,
    /// CSS `transition` value.
    pub transition: &'static str,
    /// Delay policy for the card group.
    pub card_stagger: Stagger,
    /// Delay policy for the logo group.
    pub logo_stagger: Stagger,
    /// Class added once revealed.
    pub revealed_class: &'static str,
    /// Stylesheet injected at startup so the revealed class wins over the
    /// inline starting styles.
    pub stylesheet: &'static str,
}

/// Hero frame animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameConfig {
    /// Directory prefix of the frame images.
    pub base_path: &'static str,
    /// Frame names in playback order.
    pub sequence: [&'static str; 8],
    /// Time each frame stays on screen.
    pub period: Duration,
    /// Class marking the visible pre-rendered frame element.
    pub active_class: &'static str,
}

/// Mobile menu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MenuConfig {
    /// Widths at or above this close the menu.
    pub desktop_breakpoint: f64,
    /// Quiet time after the last resize before it is acted on.
    pub resize_debounce: Duration,
    /// Class added to the toggle and panel while open.
    pub open_class: &'static str,
    /// Class toggled on accordion triggers and panels.
    pub accordion_open_class: &'static str,
    /// Class added to the body once initialized.
    pub loaded_class: &'static str,
}

/// CSS selectors the DOM adapter queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selectors {
    /// Sticky header.
    pub header: &'static str,
    /// Fixed mobile navigation bar.
    pub mobile_nav: &'static str,
    /// Hamburger button.
    pub menu_toggle: &'static str,
    /// Slide-out menu panel.
    pub mobile_menu: &'static str,
    /// Desktop navigation links.
    pub desktop_links: &'static str,
    /// Mobile navigation links.
    pub mobile_links: &'static str,
    /// Sections tracked for the active link.
    pub sections: &'static str,
    /// In-page anchors that scroll smoothly.
    pub anchors: &'static str,
    /// Accordion triggers; each panel is the trigger's next sibling.
    pub accordion_triggers: &'static str,
    /// Cards that fade in with a cyclic stagger.
    pub reveal_cards: &'static str,
    /// Logos that fade in with a sequential stagger.
    pub reveal_logos: &'static str,
    /// Hero `<img>`.
    pub hero_image: &'static str,
    /// WebP `<source>` next to the hero image.
    pub hero_webp_source: &'static str,
    /// Pre-rendered hero frame elements.
    pub hero_frames: &'static str,
    /// Attribute naming a pre-rendered frame.
    pub hero_frame_attribute: &'static str,
    /// Back-to-top button.
    pub back_to_top: &'static str,
    /// Skip link.
    pub skip_link: &'static str,
    /// Main landmark.
    pub main: &'static str,
}

/// Full page configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageConfig {
    /// Active-section tracking.
    pub sections: SectionConfig,
    /// Scroll-driven header and navigation state.
    pub nav: NavConfig,
    /// Fade-in reveal.
    pub reveal: RevealConfig,
    /// Hero frame animation.
    pub frames: FrameConfig,
    /// Mobile menu and one-shot handlers.
    pub menu: MenuConfig,
    /// DOM contract.
    pub selectors: Selectors,
}

impl PageConfig {
    /// Preset for the portfolio page.
    #[must_use]
    pub const fn portfolio() -> Self {
        Self {
            sections: SectionConfig {
                strategy: ActiveStrategy::ScrollPosition { lookahead: 100.0 },
                active_class: "nav-link-active",
            },
            nav: NavConfig {
                header_threshold: 20.0,
                header_scrolled_class: "nav-scrolled",
                hysteresis: 10.0,
                min_hide_offset: 100.0,
                mobile_breakpoint: 768.0,
                hidden_class: "mobile-nav-hidden",
                back_to_top_threshold: 400.0,
                back_to_top_class: "visible",
            },
            reveal: RevealConfig {
                threshold: 0.1,
                margin: RootMargin::new(
                    MarginValue::Px(0.0),
                    MarginValue::Px(0.0),
                    MarginValue::Px(-50.0),
                    MarginValue::Px(0.0),
                ),
                offset_px: 20.0,
                transition: "opacity 0.5s ease, transform 0.5s ease",
                card_stagger: Stagger::Cyclic {
                    cycle: 6,
                    step: Duration::from_millis(100),
                },
                logo_stagger: Stagger::Sequential {
                    step: Duration::from_millis(80),
                },
                revealed_class: "animate-in",
                stylesheet: ".animate-in { opacity: 1 !important; transform: translateY(0) !important; }",
            },
            frames: FrameConfig {
                base_path: "images/headshots/",
                sequence: ["054", "060", "064", "060", "054", "057", "072", "057"],
                period: Duration::from_millis(750),
                active_class: "active",
            },
            menu: MenuConfig {
                desktop_breakpoint: 768.0,
                resize_debounce: Duration::from_millis(250),
                open_class: "active",
                accordion_open_class: "active",
                loaded_class: "loaded",
            },
            selectors: Selectors {
                header: "#nav",
                mobile_nav: ".mobile-nav",
                menu_toggle: "#mobileMenuToggle",
                mobile_menu: "#mobileMenu",
                desktop_links: ".nav-link",
                mobile_links: ".mobile-menu-link",
                sections: "section[id]",
                anchors: "a[href^=\"#\"]",
                accordion_triggers: ".credibility-subsection-title",
                reveal_cards: ".card, .capability-card, .testimonial-card, .risk-item, .credibility-item",
                reveal_logos: ".client-logo-wrapper",
                hero_image: "#heroHeadshot",
                hero_webp_source: "source[type=\"image/webp\"]",
                hero_frames: "[data-frame]",
                hero_frame_attribute: "data-frame",
                back_to_top: ".back-to-top",
                skip_link: ".skip-link",
                main: "#main",
            },
        }
    }

    /// The portfolio preset with intersection-based section tracking
    /// (`-20% 0px -70% 0px`).
    #[must_use]
    pub const fn portfolio_observed() -> Self {
        let mut config = Self::portfolio();
        config.sections.strategy = ActiveStrategy::Intersection {
            margin: RootMargin::new(
                MarginValue::Percent(-20.0),
                MarginValue::Px(0.0),
                MarginValue::Percent(-70.0),
                MarginValue::Px(0.0),
            ),
        };
        config
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::portfolio()
    }
}
