// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page reactor: every rule behind one event surface.
//!
//! The host creates one [`Reactor`] from the scanned [`PageLayout`] and feeds
//! it browser events. Each handler returns the effects to apply; nothing in
//! here touches the DOM. Rules touch disjoint targets, so the order in which
//! independent handlers run does not matter.
//!
//! Scroll input is coalesced: the host calls
//! [`request_scroll_frame`](Reactor::request_scroll_frame) for every scroll
//! event and schedules an animation frame only when it returns `true`; the
//! frame callback then calls [`on_scroll_frame`](Reactor::on_scroll_frame).
//! Resize works the same way with a debounce: [`on_resize`](Reactor::on_resize)
//! returns the deadline to arm a timer for, and
//! [`on_resize_settled`](Reactor::on_resize_settled) ignores timers that a
//! later resize superseded.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::anchor::{AnchorOutcome, AnchorRule};
use crate::config::{ActiveStrategy, PageConfig};
use crate::effect::{Effect, Reaction, Target};
use crate::frames::{FrameCycle, FrameIndex};
use crate::geometry::{IntersectionEntry, Viewport};
use crate::menu::{AccordionRule, MenuRule};
use crate::nav::{NavChange, NavRule};
use crate::page::{AccordionId, PageLayout, RevealId, SectionId};
use crate::reveal::RevealRule;
use crate::scheduler::{Debounce, FrameGate};
use crate::sections::SectionTracker;
use crate::time::{Duration, HostTime};
use crate::trace::{
    AccordionEvent, ActiveSectionEvent, AnchorEvent, AnchorKind, FrameAdvanceEvent, HeaderEvent,
    MenuCause, MenuEvent, NavVisibilityEvent, RevealEvent, ScrollFrameEvent, Tracer,
};

/// All page rules and their shared scheduling state.
#[derive(Debug)]
pub struct Reactor {
    config: PageConfig,
    reduced_motion: bool,
    sections: SectionTracker,
    link_count: u32,
    nav: NavRule,
    reveal: RevealRule,
    frames: FrameCycle,
    menu: MenuRule,
    accordions: AccordionRule,
    anchors: AnchorRule,
    scroll_gate: FrameGate,
    resize: Debounce,
    viewport: Viewport,
}

impl Reactor {
    /// Builds the reactor for a scanned page.
    ///
    /// `reduced_motion` is read once here and never re-evaluated.
    #[must_use]
    pub fn new(layout: PageLayout, config: PageConfig, reduced_motion: bool) -> Self {
        let PageLayout {
            sections,
            links,
            reveals,
            accordions,
            hero,
            has_header,
            has_mobile_nav,
            has_menu,
            has_back_to_top,
            has_main,
        } = layout;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "a page never holds 2^32 links"
        )]
        let link_count = links.len() as u32;
        Self {
            sections: SectionTracker::new(
                sections,
                links,
                config.sections,
                config.nav.mobile_breakpoint,
                reduced_motion,
            ),
            link_count,
            nav: NavRule::new(config.nav, has_header, has_mobile_nav, has_back_to_top),
            reveal: RevealRule::new(&reveals, config.reveal),
            frames: FrameCycle::new(&hero, config.frames, reduced_motion),
            menu: MenuRule::new(config.menu, has_menu),
            accordions: AccordionRule::new(&accordions, config.menu.accordion_open_class),
            anchors: AnchorRule::new(reduced_motion, has_main),
            scroll_gate: FrameGate::new(),
            resize: Debounce::new(config.menu.resize_debounce),
            viewport: Viewport::new(0.0, 0.0, 0.0),
            config,
            reduced_motion,
        }
    }

    /// Configuration the reactor was built with.
    #[must_use]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Whether reduced motion was requested at startup.
    #[must_use]
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Last viewport seen.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Whether sections are tracked through an intersection observer.
    #[must_use]
    pub fn observes_sections(&self) -> bool {
        matches!(
            self.config.sections.strategy,
            ActiveStrategy::Intersection { .. }
        )
    }

    /// Current section.
    #[must_use]
    pub fn active_section(&self) -> Option<SectionId> {
        self.sections.active()
    }

    /// Scroll-driven chrome state.
    #[must_use]
    pub fn nav(&self) -> &NavRule {
        &self.nav
    }

    /// Fade-in state.
    #[must_use]
    pub fn reveal(&self) -> &RevealRule {
        &self.reveal
    }

    /// Hero frame state.
    #[must_use]
    pub fn frames(&self) -> &FrameCycle {
        &self.frames
    }

    /// Whether the mobile menu is open.
    #[must_use]
    pub fn menu_open(&self) -> bool {
        self.menu.is_open()
    }

    /// Accordion state.
    #[must_use]
    pub fn accordions(&self) -> &AccordionRule {
        &self.accordions
    }

    /// Timer period for the hero animation, or `None` when it never runs.
    #[must_use]
    pub fn frame_period(&self) -> Option<Duration> {
        self.frames.is_running().then_some(self.config.frames.period)
    }

    /// Initial sync once the document is ready.
    pub fn on_load(
        &mut self,
        now: HostTime,
        viewport: Viewport,
        tracer: &mut Tracer<'_>,
    ) -> Vec<Effect> {
        self.viewport = viewport;
        let mut effects = Vec::new();
        effects.push(Effect::AddClass {
            target: Target::Body,
            class: self.config.menu.loaded_class,
        });
        let (nav, change) = self.nav.on_scroll(viewport);
        effects.extend(nav);
        trace_nav(now, viewport, change, tracer);
        let before = self.sections.active();
        let sections = self.sections.sync(viewport);
        self.trace_section(now, before, &sections, tracer);
        effects.extend(sections);
        effects.extend(self.reveal.prepare());
        effects.extend(self.frames.start(now));
        effects
    }

    /// A scroll event arrived. Returns `true` when the host must request an
    /// animation frame.
    pub fn request_scroll_frame(&mut self) -> bool {
        self.scroll_gate.request()
    }

    /// The animation frame requested for scroll input.
    pub fn on_scroll_frame(
        &mut self,
        now: HostTime,
        viewport: Viewport,
        tracer: &mut Tracer<'_>,
    ) -> Vec<Effect> {
        let Some(ticket) = self.scroll_gate.take() else {
            return Vec::new();
        };
        self.viewport = viewport;
        tracer.scroll_frame(&ScrollFrameEvent {
            frame_index: ticket.frame_index,
            now,
            scroll_y: viewport.scroll_y,
            coalesced: ticket.coalesced,
        });

        let (mut effects, change) = self.nav.on_scroll(viewport);
        trace_nav(now, viewport, change, tracer);

        let before = self.sections.active();
        let sections = self.sections.on_scroll(viewport);
        self.trace_section(now, before, &sections, tracer);
        effects.extend(sections);
        effects
    }

    /// A resize event arrived. Returns the time at which the host should
    /// call [`on_resize_settled`](Self::on_resize_settled).
    pub fn on_resize(&mut self, now: HostTime) -> HostTime {
        self.resize.trigger(now)
    }

    /// Quiet period between the last resize and the settle call.
    #[must_use]
    pub fn resize_debounce(&self) -> Duration {
        self.resize.quiet()
    }

    /// A resize timer fired. Stale timers return no effects.
    ///
    /// `section_bounds` carries freshly measured section rectangles, in
    /// document order, when the host re-measured them.
    pub fn on_resize_settled(
        &mut self,
        now: HostTime,
        viewport: Viewport,
        section_bounds: Option<&[Rect]>,
        tracer: &mut Tracer<'_>,
    ) -> Vec<Effect> {
        if !self.resize.fire(now) {
            return Vec::new();
        }
        self.viewport = viewport;

        let was_open = self.menu.is_open();
        let mut effects = self.menu.on_resize(viewport.width);
        if was_open && !self.menu.is_open() {
            tracer.menu(&MenuEvent {
                now,
                open: false,
                cause: MenuCause::Resize,
            });
        }

        let (nav, change) = self.nav.on_resize(viewport);
        effects.extend(nav);
        trace_nav(now, viewport, change, tracer);

        if let Some(bounds) = section_bounds {
            self.sections.update_bounds(bounds);
            let before = self.sections.active();
            let sections = self.sections.sync(viewport);
            self.trace_section(now, before, &sections, tracer);
            effects.extend(sections);
        }
        effects
    }

    /// Section observer callback.
    pub fn on_section_intersection(
        &mut self,
        now: HostTime,
        entries: &[IntersectionEntry<SectionId>],
        viewport: Viewport,
        tracer: &mut Tracer<'_>,
    ) -> Vec<Effect> {
        self.viewport = viewport;
        let before = self.sections.active();
        let effects = self.sections.on_intersection(entries, viewport);
        self.trace_section(now, before, &effects, tracer);
        effects
    }

    /// Reveal observer callback.
    pub fn on_reveal_intersection(
        &mut self,
        now: HostTime,
        entries: &[IntersectionEntry<RevealId>],
        tracer: &mut Tracer<'_>,
    ) -> Vec<Effect> {
        let (effects, revealed) = self.reveal.on_intersection(entries);
        for id in revealed {
            tracer.reveal(&RevealEvent {
                now,
                id,
                delay: self.reveal.delay_of(id).unwrap_or(Duration::ZERO),
            });
        }
        effects
    }

    /// Hero animation timer callback.
    pub fn on_frame_tick(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> Vec<Effect> {
        let (effects, step) = self.frames.on_tick(now);
        if let Some(step) = step {
            tracer.frame_advance(&FrameAdvanceEvent {
                now,
                from: step.from.get(),
                to: step.to.get(),
                steps: step.steps,
            });
        }
        effects
    }

    /// Current hero frame.
    #[must_use]
    pub fn current_frame(&self) -> FrameIndex {
        self.frames.current()
    }

    /// Hamburger click.
    pub fn on_menu_toggle(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> Vec<Effect> {
        let effects = self.menu.toggle();
        if !effects.is_empty() {
            tracer.menu(&MenuEvent {
                now,
                open: self.menu.is_open(),
                cause: MenuCause::Toggle,
            });
        }
        effects
    }

    /// Click on a link inside the mobile menu.
    pub fn on_menu_link(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> Vec<Effect> {
        let effects = self.menu.close();
        if !effects.is_empty() {
            tracer.menu(&MenuEvent {
                now,
                open: false,
                cause: MenuCause::LinkClick,
            });
        }
        effects
    }

    /// Accordion trigger click.
    pub fn on_accordion(
        &mut self,
        now: HostTime,
        id: AccordionId,
        tracer: &mut Tracer<'_>,
    ) -> Vec<Effect> {
        let Some((open, effects)) = self.accordions.toggle(id) else {
            return Vec::new();
        };
        tracer.accordion(&AccordionEvent { now, id, open });
        effects
    }

    /// Click on an in-page fragment link.
    pub fn on_anchor_click(
        &mut self,
        now: HostTime,
        href: &str,
        target_top: Option<f64>,
        header_height: f64,
        tracer: &mut Tracer<'_>,
    ) -> Reaction {
        let (reaction, outcome) = self.anchors.on_click(href, target_top, header_height);
        let (kind, top) = match outcome {
            AnchorOutcome::Scrolled { top, .. } => (AnchorKind::Fragment, Some(top)),
            AnchorOutcome::Ignored | AnchorOutcome::Missing => (AnchorKind::Passthrough, None),
        };
        tracer.anchor(&AnchorEvent {
            now,
            kind,
            href,
            top,
        });
        reaction
    }

    /// Back-to-top click.
    pub fn on_back_to_top(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> Reaction {
        tracer.anchor(&AnchorEvent {
            now,
            kind: AnchorKind::BackToTop,
            href: "",
            top: Some(0.0),
        });
        self.anchors.on_back_to_top()
    }

    /// Skip-link click.
    pub fn on_skip_link(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> Reaction {
        tracer.anchor(&AnchorEvent {
            now,
            kind: AnchorKind::SkipLink,
            href: "",
            top: None,
        });
        self.anchors.on_skip_link()
    }

    fn trace_section(
        &self,
        now: HostTime,
        before: Option<SectionId>,
        effects: &[Effect],
        tracer: &mut Tracer<'_>,
    ) {
        if effects.is_empty() {
            return;
        }
        tracer.active_section(&ActiveSectionEvent {
            now,
            from: before,
            to: self.sections.active(),
            links: self.link_count,
        });
    }
}

fn trace_nav(now: HostTime, viewport: Viewport, change: NavChange, tracer: &mut Tracer<'_>) {
    if let Some(hidden) = change.mobile_nav_hidden {
        tracer.nav_visibility(&NavVisibilityEvent {
            now,
            hidden,
            scroll_y: viewport.scroll_y,
        });
    }
    if change.header.is_some() || change.back_to_top.is_some() {
        tracer.header(&HeaderEvent {
            now,
            scrolled: change.header,
            back_to_top: change.back_to_top,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Presenter as _, RecordingPresenter};
    use crate::clock::{Clock as _, ManualClock};
    use crate::effect::ScrollBehavior;
    use crate::page::{HeroSurface, LinkId, LinkInfo, LinkSet, RevealGroup, SectionInfo};
    use alloc::string::ToString as _;
    use alloc::vec;

    const PHONE: f64 = 390.0;
    const DESKTOP: f64 = 1280.0;

    fn layout() -> PageLayout {
        PageLayout {
            sections: vec![
                SectionInfo::new("about", 0.0, 800.0),
                SectionInfo::new("work", 800.0, 1200.0),
                SectionInfo::new("contact", 2000.0, 600.0),
            ],
            links: vec![
                LinkInfo::new("#about", LinkSet::Desktop),
                LinkInfo::new("#work", LinkSet::Desktop),
                LinkInfo::new("#contact", LinkSet::Desktop),
                LinkInfo::new("#about", LinkSet::Mobile),
                LinkInfo::new("#work", LinkSet::Mobile),
                LinkInfo::new("#contact", LinkSet::Mobile),
            ],
            reveals: vec![RevealGroup::Card, RevealGroup::Card, RevealGroup::Logo],
            accordions: vec![false],
            hero: HeroSurface::Image { webp: true },
            has_header: true,
            has_mobile_nav: true,
            has_menu: true,
            has_back_to_top: true,
            has_main: true,
        }
    }

    fn reactor() -> Reactor {
        Reactor::new(layout(), PageConfig::portfolio(), false)
    }

    fn at(y: f64, width: f64) -> Viewport {
        Viewport::new(y, width, 800.0)
    }

    /// Feeds one coalesced scroll frame.
    fn scroll(r: &mut Reactor, now: HostTime, y: f64, width: f64) -> Vec<Effect> {
        let _ = r.request_scroll_frame();
        r.on_scroll_frame(now, at(y, width), &mut Tracer::none())
    }

    #[test]
    fn load_settles_every_rule() {
        let mut r = reactor();
        let effects = r.on_load(HostTime(0), at(0.0, DESKTOP), &mut Tracer::none());
        assert_eq!(
            effects[0],
            Effect::AddClass {
                target: Target::Body,
                class: "loaded",
            },
            "body marked first"
        );
        assert_eq!(r.active_section(), Some(SectionId(0)));
        let styles = effects
            .iter()
            .filter(|e| matches!(e, Effect::SetStyle { target: Target::Reveal(_), .. }))
            .count();
        assert_eq!(styles, 12, "three reveal elements prepared");
        assert_eq!(r.frame_period(), Some(Duration::from_millis(750)));
    }

    #[test]
    fn scroll_frames_are_single_flight() {
        let mut r = reactor();
        let _ = r.on_load(HostTime(0), at(0.0, DESKTOP), &mut Tracer::none());
        assert!(r.request_scroll_frame(), "first event schedules");
        assert!(!r.request_scroll_frame(), "burst is coalesced");
        let effects = r.on_scroll_frame(HostTime(16_000), at(900.0, DESKTOP), &mut Tracer::none());
        assert!(!effects.is_empty(), "frame processed");
        assert!(
            r.on_scroll_frame(HostTime(32_000), at(950.0, DESKTOP), &mut Tracer::none())
                .is_empty(),
            "spurious frame does nothing"
        );
        assert_eq!(r.active_section(), Some(SectionId(1)));
    }

    #[test]
    fn phone_scroll_hides_nav_and_centers_link() {
        let mut r = reactor();
        let _ = r.on_load(HostTime(0), at(0.0, PHONE), &mut Tracer::none());
        let effects = scroll(&mut r, HostTime(16_000), 900.0, PHONE);
        assert!(r.nav().mobile_nav_hidden(), "downward scroll hides");
        assert!(r.nav().header_scrolled());
        assert!(r.nav().back_to_top_visible());
        assert!(
            effects.contains(&Effect::CenterInContainer {
                target: Target::NavLink(LinkId(4)),
                behavior: ScrollBehavior::Smooth,
            }),
            "mobile work link centered"
        );
    }

    #[test]
    fn resize_settle_closes_menu_and_shows_nav() {
        let clock = ManualClock::new(HostTime(0));
        let mut r = reactor();
        let _ = r.on_load(clock.now(), at(0.0, PHONE), &mut Tracer::none());
        let _ = scroll(&mut r, clock.now(), 900.0, PHONE);
        let _ = r.on_menu_toggle(clock.now(), &mut Tracer::none());
        assert!(r.menu_open());

        let first = r.on_resize(clock.now());
        clock.advance(Duration::from_millis(100));
        let second = r.on_resize(clock.now());
        assert!(second > first, "deadline pushed out");

        clock.set(first);
        assert!(
            r.on_resize_settled(clock.now(), at(900.0, DESKTOP), None, &mut Tracer::none())
                .is_empty(),
            "superseded timer"
        );

        clock.set(second);
        let effects = r.on_resize_settled(clock.now(), at(900.0, DESKTOP), None, &mut Tracer::none());
        assert!(!r.menu_open(), "desktop width closes the menu");
        assert!(!r.nav().mobile_nav_hidden(), "nav forced visible");
        assert!(
            effects.contains(&Effect::RemoveClass {
                target: Target::MobileNav,
                class: "mobile-nav-hidden",
            }),
            "nav class removed"
        );
    }

    #[test]
    fn resize_with_new_bounds_resyncs_sections() {
        let mut r = reactor();
        let _ = r.on_load(HostTime(0), at(850.0, DESKTOP), &mut Tracer::none());
        assert_eq!(r.active_section(), Some(SectionId(1)));
        let deadline = r.on_resize(HostTime(0));
        let bounds = [
            Rect::new(0.0, 0.0, 0.0, 1200.0),
            Rect::new(0.0, 1200.0, 0.0, 2400.0),
            Rect::new(0.0, 2400.0, 0.0, 3000.0),
        ];
        let _ = r.on_resize_settled(deadline, at(850.0, DESKTOP), Some(&bounds), &mut Tracer::none());
        assert_eq!(r.active_section(), Some(SectionId(0)), "about grew under the offset");
    }

    #[test]
    fn frame_ticks_swap_hero_source() {
        let clock = ManualClock::new(HostTime(0));
        let mut r = reactor();
        let mut presenter = RecordingPresenter::default();
        let _ = r.on_load(clock.now(), at(0.0, DESKTOP), &mut Tracer::none());
        for _ in 0..8 {
            clock.advance(Duration::from_millis(750));
            let effects = r.on_frame_tick(clock.now(), &mut Tracer::none());
            presenter.apply(&effects);
        }
        assert_eq!(r.current_frame(), FrameIndex::FIRST, "full loop");
        assert_eq!(presenter.applied.len(), 8);
        assert_eq!(
            presenter.applied[7],
            Effect::SetHeroSource("images/headshots/054.webp".to_string())
        );
    }

    #[test]
    fn reduced_motion_freezes_hero_and_jumps() {
        let mut r = Reactor::new(layout(), PageConfig::portfolio(), true);
        let _ = r.on_load(HostTime(0), at(0.0, DESKTOP), &mut Tracer::none());
        assert_eq!(r.frame_period(), None, "no timer");
        assert!(r.on_frame_tick(HostTime(10_000_000), &mut Tracer::none()).is_empty());

        let reaction = r.on_anchor_click(HostTime(0), "#work", Some(800.0), 72.0, &mut Tracer::none());
        assert_eq!(
            reaction.effects[0],
            Effect::ScrollWindowTo {
                top: 728.0,
                behavior: ScrollBehavior::Instant,
            }
        );
    }

    #[test]
    fn reveal_and_accordion_round_trip() {
        let mut r = reactor();
        let effects = r.on_reveal_intersection(
            HostTime(0),
            &[IntersectionEntry::entered(RevealId(2))],
            &mut Tracer::none(),
        );
        assert_eq!(effects.len(), 2, "class plus unobserve");
        assert!(r.reveal().is_revealed(RevealId(2)));

        let _ = r.on_accordion(HostTime(0), AccordionId(0), &mut Tracer::none());
        assert!(r.accordions().is_open(AccordionId(0)));
        let _ = r.on_accordion(HostTime(0), AccordionId(0), &mut Tracer::none());
        assert!(!r.accordions().is_open(AccordionId(0)), "round trip");
    }

    #[test]
    fn observed_strategy_ignores_scroll_math() {
        let mut r = Reactor::new(layout(), PageConfig::portfolio_observed(), false);
        assert!(r.observes_sections());
        let _ = r.on_load(HostTime(0), Viewport::new(0.0, DESKTOP, 1000.0), &mut Tracer::none());
        assert_eq!(r.active_section(), Some(SectionId(0)), "band 200..300 overlaps about");
        let _ = scroll(&mut r, HostTime(0), 1500.0, DESKTOP);
        assert_eq!(r.active_section(), Some(SectionId(0)), "scroll alone does not move it");
        let _ = r.on_section_intersection(
            HostTime(0),
            &[IntersectionEntry::entered(SectionId(1))],
            at(1500.0, DESKTOP),
            &mut Tracer::none(),
        );
        assert_eq!(r.active_section(), Some(SectionId(1)));
    }

    #[cfg(feature = "trace")]
    #[test]
    fn handlers_report_to_the_sink() {
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Counts {
            frames: u32,
            sections: u32,
            menus: u32,
            anchors: u32,
        }
        impl TraceSink for Counts {
            fn on_scroll_frame(&mut self, _: &ScrollFrameEvent) {
                self.frames += 1;
            }
            fn on_active_section(&mut self, _: &ActiveSectionEvent) {
                self.sections += 1;
            }
            fn on_menu(&mut self, _: &MenuEvent) {
                self.menus += 1;
            }
            fn on_anchor(&mut self, _: &AnchorEvent<'_>) {
                self.anchors += 1;
            }
        }

        let mut sink = Counts::default();
        let mut r = reactor();
        {
            let mut tracer = Tracer::new(&mut sink);
            let _ = r.on_load(HostTime(0), at(0.0, DESKTOP), &mut tracer);
            let _ = r.request_scroll_frame();
            let _ = r.on_scroll_frame(HostTime(1), at(900.0, DESKTOP), &mut tracer);
            let _ = r.on_menu_toggle(HostTime(2), &mut tracer);
            let _ = r.on_skip_link(HostTime(3), &mut tracer);
        }
        assert_eq!(sink.frames, 1, "one scroll frame");
        assert_eq!(sink.sections, 2, "load sync plus about to work");
        assert_eq!(sink.menus, 1);
        assert_eq!(sink.anchors, 1);
    }
}
