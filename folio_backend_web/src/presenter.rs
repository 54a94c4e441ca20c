// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM mutation.
//!
//! Translates reactor [`Effect`]s into class, attribute, style, scroll and
//! history calls on the elements held by a [`Registry`]. DOM call failures
//! are ignored; an effect whose target was not found is skipped.

use folio_core::backend::Presenter;
use folio_core::effect::{Effect, ScrollBehavior, Target};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use web_sys::{
    Element, HtmlElement, ScrollIntoViewOptions, ScrollLogicalPosition, ScrollToOptions, Window,
};

use crate::dom::Registry;
use crate::observer::Observer;

/// Applies effects to the scanned document.
pub struct DomPresenter {
    window: Window,
    registry: Registry,
    reveal_observer: Option<Observer>,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("registry", &self.registry)
            .field("reveal_observer", &self.reveal_observer.is_some())
            .finish_non_exhaustive()
    }
}

impl DomPresenter {
    /// Creates a presenter over the elements found by
    /// [`scan`](crate::dom::scan).
    #[must_use]
    pub fn new(window: Window, registry: Registry) -> Self {
        Self {
            window,
            registry,
            reveal_observer: None,
        }
    }

    /// The element registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Hands over the observer that [`Effect::Unobserve`] on reveal targets
    /// should reach.
    pub fn set_reveal_observer(&mut self, observer: Observer) {
        self.reveal_observer = Some(observer);
    }

    fn html(&self, target: Target) -> Option<&HtmlElement> {
        self.registry.element(target)?.dyn_ref::<HtmlElement>()
    }

    fn apply_one(&self, effect: &Effect) {
        match effect {
            Effect::AddClass { target, class } => {
                if let Some(el) = self.registry.element(*target) {
                    let _ = el.class_list().add_1(class);
                }
            }
            Effect::RemoveClass { target, class } => {
                if let Some(el) = self.registry.element(*target) {
                    let _ = el.class_list().remove_1(class);
                }
            }
            Effect::SetAttribute {
                target,
                name,
                value,
            } => {
                if let Some(el) = self.registry.element(*target) {
                    let _ = el.set_attribute(name, value);
                }
            }
            Effect::RemoveAttribute { target, name } => {
                if let Some(el) = self.registry.element(*target) {
                    let _ = el.remove_attribute(name);
                }
            }
            Effect::SetStyle {
                target,
                property,
                value,
            } => {
                if let Some(el) = self.html(*target) {
                    let style = el.style();
                    if value.is_empty() {
                        let _ = style.remove_property(property);
                    } else {
                        let _ = style.set_property(property, value);
                    }
                }
            }
            Effect::ScrollWindowTo { top, behavior } => {
                let opts = ScrollToOptions::new();
                opts.set_top(*top);
                opts.set_behavior(scroll_behavior(*behavior));
                self.window.scroll_to_with_scroll_to_options(&opts);
            }
            Effect::CenterInContainer { target, behavior } => {
                if let Some(el) = self.registry.element(*target) {
                    center(el, *behavior);
                }
            }
            Effect::PushFragment(fragment) => {
                if let Ok(history) = self.window.history() {
                    let _ = history.push_state_with_url(&JsValue::NULL, "", Some(fragment));
                }
            }
            Effect::Focus(target) => {
                if let Some(el) = self.html(*target) {
                    let _ = el.focus();
                }
            }
            Effect::SetHeroSource(path) => {
                if let Some(img) = &self.registry.hero_image {
                    img.set_src(path);
                }
                if let Some(source) = &self.registry.hero_source {
                    let _ = source.set_attribute("srcset", path);
                }
            }
            Effect::Unobserve(target) => {
                if let (Target::Reveal(id), Some(observer)) = (target, &self.reveal_observer) {
                    observer.unobserve(id.index());
                }
            }
        }
    }
}

fn scroll_behavior(behavior: ScrollBehavior) -> web_sys::ScrollBehavior {
    match behavior {
        ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        ScrollBehavior::Instant => web_sys::ScrollBehavior::Auto,
    }
}

fn center(el: &Element, behavior: ScrollBehavior) {
    let opts = ScrollIntoViewOptions::new();
    opts.set_behavior(scroll_behavior(behavior));
    opts.set_block(ScrollLogicalPosition::Nearest);
    opts.set_inline(ScrollLogicalPosition::Center);
    el.scroll_into_view_with_scroll_into_view_options(&opts);
}

impl Presenter for DomPresenter {
    fn apply(&mut self, effects: &[Effect]) {
        for effect in effects {
            self.apply_one(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduced_motion_scrolls_with_auto_behavior() {
        assert_eq!(
            scroll_behavior(ScrollBehavior::Smooth),
            web_sys::ScrollBehavior::Smooth
        );
        assert_eq!(
            scroll_behavior(ScrollBehavior::for_motion(true)),
            web_sys::ScrollBehavior::Auto,
            "instant maps to the CSSOM default"
        );
    }
}
