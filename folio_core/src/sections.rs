// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active-section tracking.
//!
//! [`SectionTracker`] decides which section is current and mirrors that onto
//! every navigation link whose `href` is `#<anchor>`, in both the desktop and
//! the mobile set. Two strategies are supported (see [`ActiveStrategy`]):
//!
//! - **Scroll position**: a section is current when
//!   `top - lookahead < scrollY <= top - lookahead + height`. When nothing
//!   qualifies (above the first section, or in a gap) no link is active.
//! - **Intersection**: a section becomes current whenever an observer entry
//!   reports it intersecting the shrunk viewport. Leaving does not clear.
//!
//! Effects are only produced when the current section changes, plus once on
//! the first sync so the initial DOM state is known.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::config::{ActiveStrategy, SectionConfig};
use crate::effect::{Effect, ScrollBehavior, Target};
use crate::geometry::{IntersectionEntry, Viewport, is_intersecting};
use crate::page::{LinkId, LinkInfo, LinkSet, SectionId, SectionInfo, id_value};

/// Tracks the current section and the active flag of every nav link.
#[derive(Clone, Debug)]
pub struct SectionTracker {
    config: SectionConfig,
    sections: Vec<SectionInfo>,
    links: Vec<LinkInfo>,
    /// Section each link points at, resolved once.
    link_targets: Vec<Option<SectionId>>,
    active: Option<SectionId>,
    synced: bool,
    mobile_breakpoint: f64,
    reduced_motion: bool,
}

impl SectionTracker {
    /// Creates a tracker over `sections` and `links`.
    #[must_use]
    pub fn new(
        sections: Vec<SectionInfo>,
        links: Vec<LinkInfo>,
        config: SectionConfig,
        mobile_breakpoint: f64,
        reduced_motion: bool,
    ) -> Self {
        let link_targets = links
            .iter()
            .map(|link| {
                sections
                    .iter()
                    .position(|s| link.points_at(&s.anchor))
                    .map(|i| SectionId(id_value(i)))
            })
            .collect();
        Self {
            config,
            sections,
            links,
            link_targets,
            active: None,
            synced: false,
            mobile_breakpoint,
            reduced_motion,
        }
    }

    /// The current section, if any.
    #[must_use]
    pub fn active(&self) -> Option<SectionId> {
        self.active
    }

    /// Anchor of a section.
    #[must_use]
    pub fn anchor(&self, id: SectionId) -> Option<&str> {
        self.sections.get(id.index()).map(|s| s.anchor.as_str())
    }

    /// Whether a link currently carries the active class.
    #[must_use]
    pub fn is_link_active(&self, id: LinkId) -> bool {
        self.active.is_some()
            && self.link_targets.get(id.index()).copied().flatten() == self.active
    }

    /// Replaces section bounds after a relayout; ids and anchors are kept.
    ///
    /// Extra or missing entries are ignored.
    pub fn update_bounds(&mut self, bounds: &[Rect]) {
        for (section, rect) in self.sections.iter_mut().zip(bounds) {
            section.bounds = *rect;
        }
    }

    /// The section selected by the scroll-position rule at `scroll_y`.
    ///
    /// Later sections win when windows overlap.
    #[must_use]
    pub fn section_at(&self, scroll_y: f64, lookahead: f64) -> Option<SectionId> {
        self.sections
            .iter()
            .enumerate()
            .filter(|(_, s)| {
                let start = s.top() - lookahead;
                scroll_y > start && scroll_y <= start + s.height()
            })
            .map(|(i, _)| SectionId(id_value(i)))
            .last()
    }

    /// Sections whose bounds intersect the viewport shrunk by the configured
    /// margin, in document order.
    ///
    /// Only meaningful with [`ActiveStrategy::Intersection`]; returns an
    /// empty list otherwise.
    #[must_use]
    pub fn intersecting(&self, viewport: Viewport) -> Vec<IntersectionEntry<SectionId>> {
        let ActiveStrategy::Intersection { margin } = self.config.strategy else {
            return Vec::new();
        };
        let band = margin.apply(viewport.rect());
        self.sections
            .iter()
            .enumerate()
            .map(|(i, s)| {
                // Sections span the full width; test the vertical extent only.
                let bounds = Rect::new(band.x0, s.bounds.y0, band.x1, s.bounds.y1);
                IntersectionEntry {
                    target: SectionId(id_value(i)),
                    is_intersecting: is_intersecting(band, bounds, 0.0),
                }
            })
            .collect()
    }

    /// Re-evaluates from layout alone, for page load and relayout.
    pub fn sync(&mut self, viewport: Viewport) -> Vec<Effect> {
        let next = match self.config.strategy {
            ActiveStrategy::ScrollPosition { lookahead } => {
                self.section_at(viewport.scroll_y, lookahead)
            }
            ActiveStrategy::Intersection { .. } => {
                let hit = self
                    .intersecting(viewport)
                    .into_iter()
                    .filter(|e| e.is_intersecting)
                    .map(|e| e.target)
                    .last();
                hit.or(self.active)
            }
        };
        self.set_active(next, viewport)
    }

    /// Handles a throttled scroll sample.
    ///
    /// Inert under [`ActiveStrategy::Intersection`]; the observer drives it.
    pub fn on_scroll(&mut self, viewport: Viewport) -> Vec<Effect> {
        match self.config.strategy {
            ActiveStrategy::ScrollPosition { lookahead } => {
                let next = self.section_at(viewport.scroll_y, lookahead);
                self.set_active(next, viewport)
            }
            ActiveStrategy::Intersection { .. } => Vec::new(),
        }
    }

    /// Handles a batch of section observer entries.
    ///
    /// The last intersecting entry in the batch wins. Inert under
    /// [`ActiveStrategy::ScrollPosition`].
    pub fn on_intersection(
        &mut self,
        entries: &[IntersectionEntry<SectionId>],
        viewport: Viewport,
    ) -> Vec<Effect> {
        if !matches!(self.config.strategy, ActiveStrategy::Intersection { .. }) {
            return Vec::new();
        }
        let hit = entries
            .iter()
            .filter(|e| e.is_intersecting && e.target.index() < self.sections.len())
            .map(|e| e.target)
            .last();
        match hit {
            Some(id) => self.set_active(Some(id), viewport),
            None => Vec::new(),
        }
    }

    fn set_active(&mut self, next: Option<SectionId>, viewport: Viewport) -> Vec<Effect> {
        if self.synced && next == self.active {
            return Vec::new();
        }
        self.synced = true;
        self.active = next;

        let class = self.config.active_class;
        let mut effects: Vec<Effect> = self
            .link_targets
            .iter()
            .enumerate()
            .map(|(i, target)| {
                let on = next.is_some() && *target == next;
                Effect::class(Target::NavLink(LinkId(id_value(i))), class, on)
            })
            .collect();

        if next.is_some() && viewport.is_narrow(self.mobile_breakpoint) {
            let behavior = ScrollBehavior::for_motion(self.reduced_motion);
            for (i, link) in self.links.iter().enumerate() {
                if link.set == LinkSet::Mobile && self.link_targets[i] == next {
                    effects.push(Effect::CenterInContainer {
                        target: Target::NavLink(LinkId(id_value(i))),
                        behavior,
                    });
                }
            }
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use alloc::vec;

    const DESKTOP: f64 = 1280.0;
    const PHONE: f64 = 390.0;

    fn links() -> Vec<LinkInfo> {
        vec![
            LinkInfo::new("#about", LinkSet::Desktop),
            LinkInfo::new("#work", LinkSet::Desktop),
            LinkInfo::new("#about", LinkSet::Mobile),
            LinkInfo::new("#work", LinkSet::Mobile),
            LinkInfo::new("https://example.com", LinkSet::Desktop),
        ]
    }

    fn tracker(config: PageConfig) -> SectionTracker {
        SectionTracker::new(
            vec![
                SectionInfo::new("about", 0.0, 500.0),
                SectionInfo::new("work", 500.0, 500.0),
            ],
            links(),
            config.sections,
            config.nav.mobile_breakpoint,
            false,
        )
    }

    fn at(y: f64, width: f64) -> Viewport {
        Viewport::new(y, width, 800.0)
    }

    fn active_links(t: &SectionTracker) -> Vec<u32> {
        (0..5)
            .filter(|&i| t.is_link_active(LinkId(i)))
            .collect()
    }

    #[test]
    fn lookahead_activates_next_section_early() {
        let mut t = tracker(PageConfig::portfolio());

        let _ = t.on_scroll(at(350.0, DESKTOP));
        assert_eq!(t.active(), Some(SectionId(0)), "350 is about");
        assert_eq!(active_links(&t), [0, 2], "desktop and mobile about links");

        let _ = t.on_scroll(at(450.0, DESKTOP));
        assert_eq!(t.active(), Some(SectionId(1)), "work starts at 500 - 100");
        assert_eq!(active_links(&t), [1, 3]);

        let _ = t.on_scroll(at(550.0, DESKTOP));
        assert_eq!(t.active(), Some(SectionId(1)), "550 is work");

        let _ = t.on_scroll(at(0.0, DESKTOP));
        assert_eq!(t.active(), Some(SectionId(0)), "0 is inside about's window");
    }

    #[test]
    fn nothing_active_above_first_window() {
        let mut t = SectionTracker::new(
            vec![
                SectionInfo::new("about", 200.0, 500.0),
                SectionInfo::new("work", 700.0, 500.0),
            ],
            links(),
            PageConfig::portfolio().sections,
            768.0,
            false,
        );
        let effects = t.on_scroll(at(0.0, DESKTOP));
        assert_eq!(t.active(), None, "0 < 200 - 100");
        assert!(active_links(&t).is_empty(), "no link active");
        assert_eq!(effects.len(), 5, "first sync clears every link");
        assert!(
            effects
                .iter()
                .all(|e| matches!(e, Effect::RemoveClass { class: "nav-link-active", .. })),
            "only removals"
        );
    }

    #[test]
    fn window_bounds_are_half_open() {
        let t = tracker(PageConfig::portfolio());
        assert_eq!(t.section_at(-100.0, 100.0), None, "exactly top - lookahead");
        assert_eq!(t.section_at(-99.0, 100.0), Some(SectionId(0)));
        assert_eq!(t.section_at(400.0, 100.0), Some(SectionId(0)), "end is inclusive");
        assert_eq!(t.section_at(400.5, 100.0), Some(SectionId(1)));
        assert_eq!(t.section_at(900.5, 100.0), None, "past the last section");
    }

    #[test]
    fn effects_only_on_change() {
        let mut t = tracker(PageConfig::portfolio());
        assert!(!t.on_scroll(at(100.0, DESKTOP)).is_empty(), "first sync");
        assert!(t.on_scroll(at(120.0, DESKTOP)).is_empty(), "same section");
        let effects = t.on_scroll(at(600.0, DESKTOP));
        assert!(
            effects.contains(&Effect::AddClass {
                target: Target::NavLink(LinkId(1)),
                class: "nav-link-active",
            }),
            "work desktop link activated"
        );
        assert!(
            effects.contains(&Effect::RemoveClass {
                target: Target::NavLink(LinkId(0)),
                class: "nav-link-active",
            }),
            "about desktop link cleared"
        );
    }

    #[test]
    fn phone_centers_active_mobile_link() {
        let mut t = tracker(PageConfig::portfolio());
        let effects = t.on_scroll(at(600.0, PHONE));
        let centered: Vec<_> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::CenterInContainer { target, behavior } => Some((*target, *behavior)),
                _ => None,
            })
            .collect();
        assert_eq!(
            centered,
            [(Target::NavLink(LinkId(3)), ScrollBehavior::Smooth)],
            "only the mobile work link"
        );

        let effects = t.on_scroll(at(100.0, DESKTOP));
        assert!(
            !effects
                .iter()
                .any(|e| matches!(e, Effect::CenterInContainer { .. })),
            "desktop never centers"
        );
    }

    #[test]
    fn reduced_motion_centers_instantly() {
        let config = PageConfig::portfolio();
        let mut t = SectionTracker::new(
            vec![SectionInfo::new("about", 0.0, 500.0)],
            links(),
            config.sections,
            768.0,
            true,
        );
        let effects = t.on_scroll(at(10.0, PHONE));
        assert!(
            effects.contains(&Effect::CenterInContainer {
                target: Target::NavLink(LinkId(2)),
                behavior: ScrollBehavior::Instant,
            }),
            "instant scroll"
        );
    }

    #[test]
    fn intersection_strategy_follows_entries() {
        let mut t = tracker(PageConfig::portfolio_observed());
        assert!(t.on_scroll(at(600.0, DESKTOP)).is_empty(), "scroll is inert");

        let _ = t.on_intersection(
            &[
                IntersectionEntry::entered(SectionId(0)),
                IntersectionEntry::entered(SectionId(1)),
            ],
            at(0.0, DESKTOP),
        );
        assert_eq!(t.active(), Some(SectionId(1)), "last entry in the batch wins");

        let effects = t.on_intersection(&[IntersectionEntry::left(SectionId(1))], at(0.0, DESKTOP));
        assert!(effects.is_empty(), "leaving keeps the section");
        assert_eq!(t.active(), Some(SectionId(1)));

        let _ = t.on_intersection(&[IntersectionEntry::entered(SectionId(9))], at(0.0, DESKTOP));
        assert_eq!(t.active(), Some(SectionId(1)), "unknown section ignored");
    }

    #[test]
    fn intersection_band_from_layout() {
        let mut t = tracker(PageConfig::portfolio_observed());
        // 1000px viewport at y=400: band is 600..700 after -20% / -70%.
        let vp = Viewport::new(400.0, DESKTOP, 1000.0);
        let hits: Vec<_> = t
            .intersecting(vp)
            .into_iter()
            .filter(|e| e.is_intersecting)
            .map(|e| e.target)
            .collect();
        assert_eq!(hits, [SectionId(1)]);
        let _ = t.sync(vp);
        assert_eq!(t.active(), Some(SectionId(1)));
    }

    #[test]
    fn relayout_moves_windows() {
        let mut t = tracker(PageConfig::portfolio());
        t.update_bounds(&[
            Rect::new(0.0, 0.0, 0.0, 1000.0),
            Rect::new(0.0, 1000.0, 0.0, 1500.0),
        ]);
        let _ = t.sync(at(600.0, DESKTOP));
        assert_eq!(t.active(), Some(SectionId(0)), "about grew to 1000px");
        assert_eq!(t.anchor(SectionId(1)), Some("work"));
    }
}
