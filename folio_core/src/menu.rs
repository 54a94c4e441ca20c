// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mobile menu and accordion toggles.

use alloc::string::ToString as _;
use alloc::vec;
use alloc::vec::Vec;

use crate::config::MenuConfig;
use crate::effect::{Effect, Target};
use crate::page::{AccordionId, id_value};

fn aria_expanded(target: Target, open: bool) -> Effect {
    Effect::SetAttribute {
        target,
        name: "aria-expanded",
        value: open.to_string(),
    }
}

/// Open/closed state of the slide-out mobile menu.
#[derive(Clone, Debug)]
pub struct MenuRule {
    config: MenuConfig,
    present: bool,
    open: bool,
}

impl MenuRule {
    /// Creates a closed menu. Without both toggle and panel it is inert.
    #[must_use]
    pub fn new(config: MenuConfig, present: bool) -> Self {
        Self {
            config,
            present,
            open: false,
        }
    }

    /// Whether the menu is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Hamburger click.
    pub fn toggle(&mut self) -> Vec<Effect> {
        self.set(!self.open)
    }

    /// Closes the menu; no effects when it is already closed.
    pub fn close(&mut self) -> Vec<Effect> {
        if self.open { self.set(false) } else { Vec::new() }
    }

    /// Debounced resize: reaching the desktop breakpoint closes the menu.
    pub fn on_resize(&mut self, width: f64) -> Vec<Effect> {
        if width >= self.config.desktop_breakpoint {
            self.close()
        } else {
            Vec::new()
        }
    }

    fn set(&mut self, open: bool) -> Vec<Effect> {
        if !self.present {
            return Vec::new();
        }
        self.open = open;
        let class = self.config.open_class;
        vec![
            Effect::class(Target::MenuToggle, class, open),
            Effect::class(Target::MobileMenu, class, open),
            aria_expanded(Target::MenuToggle, open),
            Effect::SetStyle {
                target: Target::Body,
                property: "overflow",
                value: if open { "hidden" } else { "" }.to_string(),
            },
        ]
    }
}

/// Expanded state of every accordion trigger/panel pair.
#[derive(Clone, Debug)]
pub struct AccordionRule {
    class: &'static str,
    open: Vec<bool>,
}

impl AccordionRule {
    /// Creates the rule from each trigger's initial state.
    #[must_use]
    pub fn new(initial: &[bool], class: &'static str) -> Self {
        Self {
            class,
            open: initial.to_vec(),
        }
    }

    /// Whether a pair is expanded.
    #[must_use]
    pub fn is_open(&self, id: AccordionId) -> bool {
        self.open.get(id.index()).copied().unwrap_or(false)
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.open.len()
    }

    /// Whether the page has no accordions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Trigger click. Returns the new state alongside the effects.
    pub fn toggle(&mut self, id: AccordionId) -> Option<(bool, Vec<Effect>)> {
        let slot = self.open.get_mut(id.index())?;
        *slot = !*slot;
        let open = *slot;
        Some((
            open,
            vec![
                Effect::class(Target::AccordionTrigger(id), self.class, open),
                aria_expanded(Target::AccordionTrigger(id), open),
                Effect::class(Target::AccordionPanel(id), self.class, open),
            ],
        ))
    }

    /// Ids of all pairs, in document order.
    pub fn ids(&self) -> impl Iterator<Item = AccordionId> + '_ {
        (0..self.open.len()).map(|i| AccordionId(id_value(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use alloc::string::String;

    fn menu() -> MenuRule {
        MenuRule::new(PageConfig::portfolio().menu, true)
    }

    #[test]
    fn toggle_opens_and_locks_scroll() {
        let mut m = menu();
        let effects = m.toggle();
        assert!(m.is_open());
        assert_eq!(
            effects,
            [
                Effect::AddClass {
                    target: Target::MenuToggle,
                    class: "active",
                },
                Effect::AddClass {
                    target: Target::MobileMenu,
                    class: "active",
                },
                Effect::SetAttribute {
                    target: Target::MenuToggle,
                    name: "aria-expanded",
                    value: "true".to_string(),
                },
                Effect::SetStyle {
                    target: Target::Body,
                    property: "overflow",
                    value: "hidden".to_string(),
                },
            ]
        );
        let effects = m.toggle();
        assert!(!m.is_open());
        assert!(
            effects.contains(&Effect::SetStyle {
                target: Target::Body,
                property: "overflow",
                value: String::new(),
            }),
            "overflow cleared on close"
        );
    }

    #[test]
    fn link_click_closes_only_when_open() {
        let mut m = menu();
        assert!(m.close().is_empty(), "closing a closed menu is a no-op");
        let _ = m.toggle();
        assert_eq!(m.close().len(), 4);
        assert!(!m.is_open());
    }

    #[test]
    fn resize_closes_at_breakpoint() {
        let mut m = menu();
        let _ = m.toggle();
        assert!(m.on_resize(767.0).is_empty(), "still mobile");
        assert!(m.is_open());
        assert!(!m.on_resize(768.0).is_empty(), "breakpoint is inclusive");
        assert!(!m.is_open());
    }

    #[test]
    fn missing_menu_is_inert() {
        let mut m = MenuRule::new(PageConfig::portfolio().menu, false);
        assert!(m.toggle().is_empty());
    }

    #[test]
    fn accordion_round_trip() {
        let mut a = AccordionRule::new(&[false, true], "active");
        let (open, effects) = a.toggle(AccordionId(0)).unwrap();
        assert!(open, "was collapsed");
        assert!(
            effects.contains(&Effect::SetAttribute {
                target: Target::AccordionTrigger(AccordionId(0)),
                name: "aria-expanded",
                value: "true".to_string(),
            }),
            "aria flipped"
        );
        assert!(
            effects.contains(&Effect::AddClass {
                target: Target::AccordionPanel(AccordionId(0)),
                class: "active",
            }),
            "panel opened"
        );
        let (open, _) = a.toggle(AccordionId(0)).unwrap();
        assert!(!open, "second click restores");

        let (open, _) = a.toggle(AccordionId(1)).unwrap();
        assert!(!open, "initially expanded pair collapses");
        assert!(a.toggle(AccordionId(5)).is_none(), "unknown trigger");
        assert_eq!(a.ids().count(), 2);
    }
}
