// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-page navigation: fragment links, back-to-top and the skip link.
//!
//! These are one-shot handlers. Each returns a [`Reaction`] so the adapter
//! knows whether to cancel the browser's own jump.

use alloc::string::{String, ToString as _};
use alloc::vec;

use crate::effect::{Effect, Reaction, ScrollBehavior, Target};

/// What an anchor click resolved to.
#[derive(Clone, Debug, PartialEq)]
pub enum AnchorOutcome {
    /// `href` was empty or `#`; the browser handles it.
    Ignored,
    /// No element with that id; the browser handles it.
    Missing,
    /// Scrolled to `top`.
    Scrolled {
        /// Fragment pushed to history.
        fragment: String,
        /// Window offset scrolled to.
        top: f64,
    },
}

/// Fragment-link, back-to-top and skip-link handling.
#[derive(Clone, Copy, Debug)]
pub struct AnchorRule {
    behavior: ScrollBehavior,
    has_main: bool,
}

impl AnchorRule {
    /// Creates the rule.
    #[must_use]
    pub fn new(reduced_motion: bool, has_main: bool) -> Self {
        Self {
            behavior: ScrollBehavior::for_motion(reduced_motion),
            has_main,
        }
    }

    /// The fragment an `href` names, or `None` for empty and bare `#`.
    #[must_use]
    pub fn fragment(href: &str) -> Option<&str> {
        match href {
            "" | "#" => None,
            _ => Some(href),
        }
    }

    /// Click on an `a[href^="#"]`.
    ///
    /// `target_top` is the `offsetTop` of the element the fragment selects, if
    /// one exists; `header_height` is the current header `offsetHeight`.
    pub fn on_click(
        &self,
        href: &str,
        target_top: Option<f64>,
        header_height: f64,
    ) -> (Reaction, AnchorOutcome) {
        let Some(fragment) = Self::fragment(href) else {
            return (Reaction::none(), AnchorOutcome::Ignored);
        };
        let Some(target_top) = target_top else {
            return (Reaction::none(), AnchorOutcome::Missing);
        };
        let top = target_top - header_height;
        let reaction = Reaction::handled(vec![
            Effect::ScrollWindowTo {
                top,
                behavior: self.behavior,
            },
            Effect::PushFragment(fragment.to_string()),
        ]);
        (
            reaction,
            AnchorOutcome::Scrolled {
                fragment: fragment.to_string(),
                top,
            },
        )
    }

    /// Click on the back-to-top button.
    pub fn on_back_to_top(&self) -> Reaction {
        Reaction::handled(vec![Effect::ScrollWindowTo {
            top: 0.0,
            behavior: self.behavior,
        }])
    }

    /// Click on the skip link: focus `#main` without leaving it tabbable.
    pub fn on_skip_link(&self) -> Reaction {
        if !self.has_main {
            return Reaction::handled(vec![]);
        }
        Reaction::handled(vec![
            Effect::SetAttribute {
                target: Target::Main,
                name: "tabindex",
                value: "-1".to_string(),
            },
            Effect::Focus(Target::Main),
            Effect::RemoveAttribute {
                target: Target::Main,
                name: "tabindex",
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_bare_hash_are_ignored() {
        let rule = AnchorRule::new(false, true);
        for href in ["", "#"] {
            let (reaction, outcome) = rule.on_click(href, Some(100.0), 64.0);
            assert!(reaction.is_empty(), "{href:?} keeps the default");
            assert_eq!(outcome, AnchorOutcome::Ignored);
        }
    }

    #[test]
    fn missing_target_keeps_default() {
        let rule = AnchorRule::new(false, true);
        let (reaction, outcome) = rule.on_click("#nowhere", None, 64.0);
        assert!(!reaction.prevent_default, "browser handles it");
        assert_eq!(outcome, AnchorOutcome::Missing);
    }

    #[test]
    fn scrolls_below_header_and_pushes_fragment() {
        let rule = AnchorRule::new(false, true);
        let (reaction, outcome) = rule.on_click("#work", Some(900.0), 64.0);
        assert!(reaction.prevent_default);
        assert_eq!(
            reaction.effects,
            [
                Effect::ScrollWindowTo {
                    top: 836.0,
                    behavior: ScrollBehavior::Smooth,
                },
                Effect::PushFragment("#work".to_string()),
            ]
        );
        assert_eq!(
            outcome,
            AnchorOutcome::Scrolled {
                fragment: "#work".to_string(),
                top: 836.0,
            }
        );
    }

    #[test]
    fn reduced_motion_jumps() {
        let rule = AnchorRule::new(true, true);
        let reaction = rule.on_back_to_top();
        assert_eq!(
            reaction.effects,
            [Effect::ScrollWindowTo {
                top: 0.0,
                behavior: ScrollBehavior::Instant,
            }]
        );
    }

    #[test]
    fn skip_link_focuses_main_transiently() {
        let reaction = AnchorRule::new(false, true).on_skip_link();
        assert!(reaction.prevent_default);
        assert_eq!(reaction.effects.len(), 3);
        assert_eq!(reaction.effects[1], Effect::Focus(Target::Main));
        assert!(
            matches!(
                reaction.effects[2],
                Effect::RemoveAttribute {
                    name: "tabindex",
                    ..
                }
            ),
            "tabindex removed after focus"
        );

        let reaction = AnchorRule::new(false, false).on_skip_link();
        assert!(reaction.prevent_default && reaction.effects.is_empty(), "no main");
    }
}
