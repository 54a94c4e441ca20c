// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Portfolio page interactivity.
//!
//! Scans the document, builds one [`Reactor`], and forwards scroll, resize,
//! click, timer and observer callbacks to it. All state lives in a single
//! `Rc<RefCell<PageState>>` shared by the listener closures, which stay
//! registered for the life of the page.
//!
//! Build with: `wasm-pack build --target web folio_page`
//! and load the module with `<script type="module">`. Module scripts are
//! deferred, so the document is parsed by the time [`main`] runs.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use folio_backend_web::{
    ConsoleSink, DomPresenter, FrameRequest, IntervalTimer, Observer, ObserverOptions,
    Presenter as _, Registry, Timeout, fragment_target_top, inject_stylesheet, now,
    prefers_reduced_motion, scan, viewport,
};
use folio_core::config::{ActiveStrategy, PageConfig};
use folio_core::effect::Reaction;
use folio_core::page::{AccordionId, LinkSet, RevealId, SectionId};
use folio_core::reactor::Reactor;
use folio_core::time::HostTime;
use folio_core::trace::Tracer;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, Window};

struct PageState {
    window: Window,
    document: Document,
    reactor: Reactor,
    presenter: DomPresenter,
    sink: Option<ConsoleSink>,
    resize_deadline: HostTime,
}

type Shared = Rc<RefCell<PageState>>;

impl PageState {
    /// Runs one reactor handler and applies what it returns.
    fn handle<R: Into<Reaction>>(
        &mut self,
        event: Option<&Event>,
        f: impl FnOnce(&mut Reactor, &Registry, &mut Tracer<'_>) -> R,
    ) {
        let Self {
            reactor,
            presenter,
            sink,
            ..
        } = self;
        let mut tracer = match sink {
            Some(sink) => Tracer::new(sink),
            None => Tracer::none(),
        };
        let reaction = f(reactor, presenter.registry(), &mut tracer).into();
        if reaction.prevent_default
            && let Some(event) = event
        {
            event.prevent_default();
        }
        presenter.apply(&reaction.effects);
    }
}

/// Entry point for the page.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let config = PageConfig::portfolio();
    let reduced_motion = prefers_reduced_motion(&window);
    let (layout, registry) = scan(&document, &config.selectors);

    if !layout.reveals.is_empty() {
        inject_stylesheet(&document, config.reveal.stylesheet);
    }
    let mobile_links: Vec<Element> = layout
        .links
        .iter()
        .zip(registry.links())
        .filter(|(link, _)| link.set == LinkSet::Mobile)
        .map(|(_, el)| el.clone())
        .collect();
    let has_menu = layout.has_menu;

    let state: Shared = Rc::new(RefCell::new(PageState {
        window: window.clone(),
        document,
        reactor: Reactor::new(layout, config, reduced_motion),
        presenter: DomPresenter::new(window.clone(), registry),
        sink: cfg!(feature = "trace").then(ConsoleSink::default),
        resize_deadline: HostTime(0),
    }));

    {
        let mut s = state.borrow_mut();
        let vp = viewport(&s.window);
        s.handle(None, |r, _, t| r.on_load(now(), vp, t));
    }

    bind_observers(&state)?;
    bind_scroll(&state, &window)?;
    bind_resize(&state, &window)?;
    bind_frames(&state);
    bind_clicks(&state, &mobile_links, has_menu)?;
    Ok(())
}

fn listen(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

fn bind_observers(state: &Shared) -> Result<(), JsValue> {
    let (reveals, reveal_options, sections, section_margin) = {
        let s = state.borrow();
        let config = s.reactor.config();
        let registry = s.presenter.registry();
        let section_margin = match config.sections.strategy {
            ActiveStrategy::Intersection { margin } => Some(margin),
            ActiveStrategy::ScrollPosition { .. } => None,
        };
        (
            registry.reveals().to_vec(),
            ObserverOptions {
                threshold: config.reveal.threshold,
                margin: config.reveal.margin,
            },
            registry
                .sections()
                .iter()
                .map(|el| el.clone().into())
                .collect::<Vec<Element>>(),
            section_margin,
        )
    };

    if !reveals.is_empty() {
        let cb_state = Rc::clone(state);
        let observer = Observer::new(
            reveals,
            reveal_options,
            RevealId::from_index,
            move |entries| {
                cb_state
                    .borrow_mut()
                    .handle(None, |r, _, t| r.on_reveal_intersection(now(), entries, t));
            },
        )?;
        state.borrow_mut().presenter.set_reveal_observer(observer);
    }

    if let Some(margin) = section_margin
        && !sections.is_empty()
    {
        let cb_state = Rc::clone(state);
        let options = ObserverOptions {
            threshold: 0.0,
            margin,
        };
        let observer = Observer::new(sections, options, SectionId::from_index, move |entries| {
            let mut s = cb_state.borrow_mut();
            let vp = viewport(&s.window);
            s.handle(None, |r, _, t| r.on_section_intersection(now(), entries, vp, t));
        })?;
        core::mem::forget(observer);
    }
    Ok(())
}

fn bind_scroll(state: &Shared, window: &Window) -> Result<(), JsValue> {
    let frame_state = Rc::clone(state);
    let frame = FrameRequest::new(move |at| {
        let mut s = frame_state.borrow_mut();
        let vp = viewport(&s.window);
        s.handle(None, |r, _, t| r.on_scroll_frame(at, vp, t));
    });

    let scroll_state = Rc::clone(state);
    let cb = Closure::wrap(Box::new(move |_: Event| {
        if scroll_state.borrow_mut().reactor.request_scroll_frame() {
            frame.request();
        }
    }) as Box<dyn FnMut(Event)>);
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    window.add_event_listener_with_callback_and_add_event_listener_options(
        "scroll",
        cb.as_ref().unchecked_ref(),
        &options,
    )?;
    cb.forget();
    Ok(())
}

fn bind_resize(state: &Shared, window: &Window) -> Result<(), JsValue> {
    let settle_state = Rc::clone(state);
    let timeout = Timeout::new(move |at| {
        let mut s = settle_state.borrow_mut();
        // Only the last armed timeout runs; never report it as early.
        let at = at.max(s.resize_deadline);
        let vp = viewport(&s.window);
        s.handle(None, |r, registry, t| {
            let bounds = registry.measure_sections();
            r.on_resize_settled(at, vp, Some(&bounds), t)
        });
    });

    let resize_state = Rc::clone(state);
    listen(window, "resize", move |_| {
        let mut s = resize_state.borrow_mut();
        let deadline = s.reactor.on_resize(now());
        s.resize_deadline = deadline;
        timeout.arm(s.reactor.resize_debounce());
    })
}

fn bind_frames(state: &Shared) {
    let Some(period) = state.borrow().reactor.frame_period() else {
        return;
    };
    let tick_state = Rc::clone(state);
    let timer = IntervalTimer::start(period, move |at| {
        tick_state
            .borrow_mut()
            .handle(None, |r, _, t| r.on_frame_tick(at, t));
    });
    core::mem::forget(timer);
}

fn bind_clicks(state: &Shared, mobile_links: &[Element], has_menu: bool) -> Result<(), JsValue> {
    let (toggle, back_to_top, skip_link, triggers, anchors) = {
        let s = state.borrow();
        let registry = s.presenter.registry();
        (
            registry.menu_toggle().cloned(),
            registry.back_to_top().cloned(),
            registry.skip_link().cloned(),
            registry.triggers().to_vec(),
            registry.anchors().to_vec(),
        )
    };

    if has_menu {
        if let Some(toggle) = toggle {
            let cb_state = Rc::clone(state);
            listen(&toggle, "click", move |_| {
                cb_state
                    .borrow_mut()
                    .handle(None, |r, _, t| r.on_menu_toggle(now(), t));
            })?;
        }
        for link in mobile_links {
            let cb_state = Rc::clone(state);
            listen(link, "click", move |_| {
                cb_state
                    .borrow_mut()
                    .handle(None, |r, _, t| r.on_menu_link(now(), t));
            })?;
        }
    }

    for anchor in anchors {
        let cb_state = Rc::clone(state);
        let el = anchor.clone();
        listen(&anchor, "click", move |event| {
            let mut s = cb_state.borrow_mut();
            let href = el.get_attribute("href").unwrap_or_default();
            let target_top = fragment_target_top(&s.document, &href);
            s.handle(Some(&event), |r, registry, t| {
                r.on_anchor_click(now(), &href, target_top, registry.header_height(), t)
            });
        })?;
    }

    for (i, trigger) in triggers.iter().enumerate() {
        let cb_state = Rc::clone(state);
        let id = AccordionId::from_index(i);
        listen(trigger, "click", move |_| {
            cb_state
                .borrow_mut()
                .handle(None, |r, _, t| r.on_accordion(now(), id, t));
        })?;
    }

    if let Some(button) = back_to_top {
        let cb_state = Rc::clone(state);
        listen(&button, "click", move |event| {
            cb_state
                .borrow_mut()
                .handle(Some(&event), |r, _, t| r.on_back_to_top(now(), t));
        })?;
    }

    if let Some(link) = skip_link {
        let cb_state = Rc::clone(state);
        listen(&link, "click", move |event| {
            cb_state
                .borrow_mut()
                .handle(Some(&event), |r, _, t| r.on_skip_link(now(), t));
        })?;
    }
    Ok(())
}
