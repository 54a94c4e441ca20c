// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hero frame cycle.
//!
//! A fixed table of eight frame names played in order, wrapping forever.
//! Every timer callback advances exactly one frame, however late it arrives.
//! An [`Interval`] fed from an injected clock measures how many periods each
//! callback covered, for tracing only.
//!
//! Two surfaces are supported: swapping the `src` of a single image, or
//! moving an active class between pre-rendered elements tagged with their
//! frame name. With reduced motion the cycle never starts and the first
//! frame stays on screen.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::clock::Interval;
use crate::config::FrameConfig;
use crate::effect::{Effect, Target};
use crate::page::{FrameId, HeroSurface, id_value};
use crate::time::HostTime;

/// Number of frames in a cycle.
pub const FRAME_COUNT: usize = 8;

/// Index into the frame table, always `< FRAME_COUNT`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameIndex(usize);

impl FrameIndex {
    /// The first frame.
    pub const FIRST: Self = Self(0);

    /// Position in the frame table.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// The following frame, wrapping after the last.
    #[must_use]
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % FRAME_COUNT)
    }
}

#[derive(Clone, Debug)]
enum Surface {
    Image { ext: &'static str },
    /// Element for each table slot, when one is tagged with that name.
    Elements { slots: [Option<FrameId>; FRAME_COUNT], count: usize },
}

/// One step of the cycle, for tracing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameStep {
    /// Frame shown before the tick.
    pub from: FrameIndex,
    /// Frame shown after the tick.
    pub to: FrameIndex,
    /// Periods the timer callback covered; more than one when the host
    /// delivered it late. The frame still moves by one.
    pub steps: u64,
}

/// The hero frame animation.
#[derive(Clone, Debug)]
pub struct FrameCycle {
    config: FrameConfig,
    surface: Option<Surface>,
    index: FrameIndex,
    animate: bool,
    interval: Option<Interval>,
}

impl FrameCycle {
    /// Creates the cycle for the given hero surface.
    ///
    /// The cycle is inert when the surface is absent or `reduced_motion` is
    /// set; it still reports [`FrameIndex::FIRST`].
    #[must_use]
    pub fn new(hero: &HeroSurface, config: FrameConfig, reduced_motion: bool) -> Self {
        let surface = match hero {
            HeroSurface::Absent => None,
            HeroSurface::Image { webp } => Some(Surface::Image {
                ext: if *webp { ".webp" } else { ".jpg" },
            }),
            HeroSurface::Elements { tags } => {
                let mut slots = [None; FRAME_COUNT];
                for (slot, name) in slots.iter_mut().zip(config.sequence) {
                    *slot = tags
                        .iter()
                        .position(|t| t == name)
                        .map(|i| FrameId(id_value(i)));
                }
                Some(Surface::Elements {
                    slots,
                    count: tags.len(),
                })
            }
        };
        Self {
            config,
            surface,
            index: FrameIndex::FIRST,
            animate: !reduced_motion,
            interval: None,
        }
    }

    /// Whether the cycle will advance.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// The frame on screen.
    #[must_use]
    pub fn current(&self) -> FrameIndex {
        self.index
    }

    /// Name of the frame on screen.
    #[must_use]
    pub fn current_name(&self) -> &'static str {
        self.config.sequence[self.index.get()]
    }

    /// Image path for a frame in image mode.
    #[must_use]
    pub fn path_of(&self, index: FrameIndex) -> Option<String> {
        match self.surface {
            Some(Surface::Image { ext }) => Some(format!(
                "{}{}{}",
                self.config.base_path,
                self.config.sequence[index.get()],
                ext
            )),
            _ => None,
        }
    }

    /// Starts the cycle at `now` and returns the effects that settle the
    /// first frame.
    pub fn start(&mut self, now: HostTime) -> Vec<Effect> {
        self.index = FrameIndex::FIRST;
        let mut effects = Vec::new();
        if let Some(Surface::Elements { slots, count }) = &self.surface {
            let first = slots[0];
            for i in 0..*count {
                let id = FrameId(id_value(i));
                effects.push(Effect::class(
                    Target::Frame(id),
                    self.config.active_class,
                    Some(id) == first,
                ));
            }
        }
        if self.surface.is_some() && self.animate {
            self.interval = Some(Interval::new(now, self.config.period));
        }
        effects
    }

    /// Advances one frame for a timer callback at `now`.
    pub fn on_tick(&mut self, now: HostTime) -> (Vec<Effect>, Option<FrameStep>) {
        let Some(interval) = self.interval.as_mut() else {
            return (Vec::new(), None);
        };
        let steps = interval.tick(now);
        let from = self.index;
        self.index = from.next();
        let to = self.index;
        (self.show(from, to), Some(FrameStep { from, to, steps }))
    }

    fn show(&self, from: FrameIndex, to: FrameIndex) -> Vec<Effect> {
        if from == to {
            return Vec::new();
        }
        match &self.surface {
            Some(Surface::Image { .. }) => self
                .path_of(to)
                .map(Effect::SetHeroSource)
                .into_iter()
                .collect(),
            Some(Surface::Elements { slots, .. }) => {
                let (old, new) = (slots[from.get()], slots[to.get()]);
                if old == new {
                    return Vec::new();
                }
                let class = self.config.active_class;
                old.map(|id| Effect::class(Target::Frame(id), class, false))
                    .into_iter()
                    .chain(new.map(|id| Effect::class(Target::Frame(id), class, true)))
                    .collect()
            }
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock as _, ManualClock};
    use crate::config::PageConfig;
    use crate::time::Duration;
    use alloc::string::ToString as _;
    use alloc::vec;

    const PERIOD: Duration = Duration::from_millis(750);

    fn image(webp: bool, reduced: bool) -> FrameCycle {
        FrameCycle::new(
            &HeroSurface::Image { webp },
            PageConfig::portfolio().frames,
            reduced,
        )
    }

    fn tags() -> HeroSurface {
        HeroSurface::Elements {
            tags: ["054", "057", "060", "064", "072"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }

    #[test]
    fn index_sequence_wraps() {
        let clock = ManualClock::new(HostTime(0));
        let mut cycle = image(false, false);
        let _ = cycle.start(clock.now());
        let mut seen = vec![cycle.current().get()];
        for _ in 0..10 {
            clock.advance(PERIOD);
            let (_, step) = cycle.on_tick(clock.now());
            assert_eq!(step.map(|s| s.steps), Some(1), "one step per period");
            seen.push(cycle.current().get());
        }
        assert_eq!(seen, [0, 1, 2, 3, 4, 5, 6, 7, 0, 1, 2]);
    }

    #[test]
    fn image_mode_swaps_source() {
        let clock = ManualClock::new(HostTime(0));
        let mut cycle = image(true, false);
        assert!(cycle.start(clock.now()).is_empty(), "first image is already in the markup");
        assert!(cycle.is_running());

        clock.advance(PERIOD);
        let (effects, _) = cycle.on_tick(clock.now());
        assert_eq!(
            effects,
            [Effect::SetHeroSource("images/headshots/060.webp".to_string())]
        );
        assert_eq!(cycle.current_name(), "060");
        assert_eq!(
            image(false, false).path_of(FrameIndex(6)).as_deref(),
            Some("images/headshots/072.jpg")
        );
    }

    #[test]
    fn irregular_timer_spacing_still_steps_one_frame() {
        let mut cycle = image(false, false);
        let _ = cycle.start(HostTime(0));
        let mut seen = vec![cycle.current().get()];
        for ms in [1000, 2000, 3000, 4000, 5000, 6000, 6700, 8800] {
            let (effects, step) = cycle.on_tick(HostTime(ms * 1000));
            assert_eq!(effects.len(), 1, "each callback shows the next frame");
            assert_eq!(step.map(|s| s.to), Some(cycle.current()));
            seen.push(cycle.current().get());
        }
        assert_eq!(seen, [0, 1, 2, 3, 4, 5, 6, 7, 0], "no frame skipped");
    }

    #[test]
    fn late_timer_is_reported_but_not_skipped() {
        let mut cycle = image(false, false);
        let _ = cycle.start(HostTime(0));
        let (effects, step) = cycle.on_tick(HostTime(3_100_000));
        assert_eq!(
            step,
            Some(FrameStep {
                from: FrameIndex(0),
                to: FrameIndex(1),
                steps: 4,
            }),
            "background-tab throttling"
        );
        assert_eq!(
            effects,
            [Effect::SetHeroSource("images/headshots/060.jpg".to_string())]
        );
    }

    #[test]
    fn reduced_motion_never_advances() {
        let clock = ManualClock::new(HostTime(0));
        let mut cycle = image(false, true);
        let _ = cycle.start(clock.now());
        assert!(!cycle.is_running());
        for _ in 0..20 {
            clock.advance(PERIOD);
            let (effects, step) = cycle.on_tick(clock.now());
            assert!(effects.is_empty() && step.is_none(), "inert");
        }
        assert_eq!(cycle.current(), FrameIndex::FIRST);
    }

    #[test]
    fn element_mode_moves_active_class() {
        let mut cycle = FrameCycle::new(&tags(), PageConfig::portfolio().frames, false);
        let effects = cycle.start(HostTime(0));
        assert_eq!(effects.len(), 5, "every tagged element settled");
        assert_eq!(
            effects[0],
            Effect::AddClass {
                target: Target::Frame(FrameId(0)),
                class: "active",
            },
            "054 starts active"
        );

        let (effects, _) = cycle.on_tick(HostTime(750_000));
        assert_eq!(
            effects,
            [
                Effect::RemoveClass {
                    target: Target::Frame(FrameId(0)),
                    class: "active",
                },
                Effect::AddClass {
                    target: Target::Frame(FrameId(2)),
                    class: "active",
                },
            ],
            "054 to 060"
        );
    }

    #[test]
    fn element_mode_with_reduced_motion_marks_first_frame() {
        let mut cycle = FrameCycle::new(&tags(), PageConfig::portfolio().frames, true);
        let effects = cycle.start(HostTime(0));
        assert!(
            effects.contains(&Effect::AddClass {
                target: Target::Frame(FrameId(0)),
                class: "active",
            }),
            "first frame shown statically"
        );
        assert!(!cycle.is_running());
    }

    #[test]
    fn absent_hero_is_inert() {
        let mut cycle = FrameCycle::new(&HeroSurface::Absent, PageConfig::portfolio().frames, false);
        assert!(cycle.start(HostTime(0)).is_empty());
        assert!(!cycle.is_running());
        assert_eq!(cycle.path_of(FrameIndex::FIRST), None);
    }
}
