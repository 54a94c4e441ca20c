// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot fade-in on first intersection.
//!
//! Every reveal element starts hidden and offset with a staggered transition
//! delay. The first intersecting observer entry adds the revealed class and
//! unobserves the element; the transition is monotonic, so later entries for
//! the same element, entering or leaving, produce nothing.

use alloc::format;
use alloc::string::{String, ToString as _};
use alloc::vec::Vec;

use crate::config::RevealConfig;
use crate::effect::{Effect, Target};
use crate::geometry::IntersectionEntry;
use crate::page::{RevealGroup, RevealId, id_value};
use crate::time::Duration;

/// Transition-delay policy for a group of reveal elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stagger {
    /// `(index mod cycle) × step`; restarts every `cycle` elements.
    Cyclic {
        /// Elements per cycle. Zero behaves like one.
        cycle: u32,
        /// Delay increment.
        step: Duration,
    },
    /// `index × step`, uncapped.
    Sequential {
        /// Delay increment.
        step: Duration,
    },
}

impl Stagger {
    /// Delay for the element at `index` within its group.
    #[must_use]
    pub fn delay(self, index: usize) -> Duration {
        match self {
            Self::Cyclic { cycle, step } => {
                let slot = index as u64 % u64::from(cycle.max(1));
                step.saturating_mul(slot)
            }
            Self::Sequential { step } => step.saturating_mul(index as u64),
        }
    }
}

/// Formats a delay as a CSS time value in seconds.
#[must_use]
pub fn css_seconds(d: Duration) -> String {
    format!("{}s", d.as_secs_f64())
}

#[derive(Clone, Copy, Debug)]
struct RevealState {
    group: RevealGroup,
    /// Position within the group, which drives the stagger.
    slot: usize,
    revealed: bool,
}

/// Fade-in state for all reveal elements on the page.
#[derive(Clone, Debug)]
pub struct RevealRule {
    config: RevealConfig,
    elements: Vec<RevealState>,
}

impl RevealRule {
    /// Creates the rule for elements of the given groups, in document order.
    #[must_use]
    pub fn new(groups: &[RevealGroup], config: RevealConfig) -> Self {
        let mut cards = 0;
        let mut logos = 0;
        let elements = groups
            .iter()
            .map(|&group| {
                let counter = match group {
                    RevealGroup::Card => &mut cards,
                    RevealGroup::Logo => &mut logos,
                };
                let slot = *counter;
                *counter += 1;
                RevealState {
                    group,
                    slot,
                    revealed: false,
                }
            })
            .collect();
        Self { config, elements }
    }

    /// Number of managed elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the page has no reveal elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Whether the element has been revealed.
    #[must_use]
    pub fn is_revealed(&self, id: RevealId) -> bool {
        self.elements.get(id.index()).is_some_and(|e| e.revealed)
    }

    /// Number of elements revealed so far.
    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.elements.iter().filter(|e| e.revealed).count()
    }

    /// Transition delay assigned to an element.
    #[must_use]
    pub fn delay_of(&self, id: RevealId) -> Option<Duration> {
        let e = self.elements.get(id.index())?;
        let stagger = match e.group {
            RevealGroup::Card => self.config.card_stagger,
            RevealGroup::Logo => self.config.logo_stagger,
        };
        Some(stagger.delay(e.slot))
    }

    /// Initial hidden styles for every element that is not yet revealed.
    #[must_use]
    pub fn prepare(&self) -> Vec<Effect> {
        let offset = format!("translateY({}px)", self.config.offset_px);
        let mut effects = Vec::with_capacity(self.elements.len() * 4);
        for (i, e) in self.elements.iter().enumerate() {
            if e.revealed {
                continue;
            }
            let id = RevealId(id_value(i));
            let target = Target::Reveal(id);
            let delay = self.delay_of(id).unwrap_or(Duration::ZERO);
            effects.push(Effect::SetStyle {
                target,
                property: "opacity",
                value: "0".to_string(),
            });
            effects.push(Effect::SetStyle {
                target,
                property: "transform",
                value: offset.clone(),
            });
            effects.push(Effect::SetStyle {
                target,
                property: "transition",
                value: self.config.transition.to_string(),
            });
            effects.push(Effect::SetStyle {
                target,
                property: "transition-delay",
                value: css_seconds(delay),
            });
        }
        effects
    }

    /// Handles a batch of observer entries.
    ///
    /// Returns the ids newly revealed by this batch alongside the effects.
    pub fn on_intersection(
        &mut self,
        entries: &[IntersectionEntry<RevealId>],
    ) -> (Vec<Effect>, Vec<RevealId>) {
        let mut effects = Vec::new();
        let mut revealed = Vec::new();
        for entry in entries {
            if !entry.is_intersecting {
                continue;
            }
            let Some(state) = self.elements.get_mut(entry.target.index()) else {
                continue;
            };
            if state.revealed {
                continue;
            }
            state.revealed = true;
            let target = Target::Reveal(entry.target);
            effects.push(Effect::AddClass {
                target,
                class: self.config.revealed_class,
            });
            effects.push(Effect::Unobserve(target));
            revealed.push(entry.target);
        }
        (effects, revealed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use alloc::string::ToString as _;
    use alloc::vec;

    fn rule(groups: &[RevealGroup]) -> RevealRule {
        RevealRule::new(groups, PageConfig::portfolio().reveal)
    }

    #[test]
    fn card_stagger_wraps_every_six() {
        let cards = vec![RevealGroup::Card; 8];
        let r = rule(&cards);
        let delays: Vec<u64> = (0..8)
            .map(|i| r.delay_of(RevealId(i)).unwrap().as_millis())
            .collect();
        assert_eq!(delays, [0, 100, 200, 300, 400, 500, 0, 100]);
    }

    #[test]
    fn logo_stagger_is_uncapped_and_counted_per_group() {
        let mut groups = vec![RevealGroup::Card; 3];
        groups.extend([RevealGroup::Logo; 9]);
        let r = rule(&groups);
        assert_eq!(r.delay_of(RevealId(3)), Some(Duration::ZERO), "first logo");
        assert_eq!(
            r.delay_of(RevealId(11)),
            Some(Duration::from_millis(640)),
            "ninth logo is 8 × 80ms"
        );
        assert_eq!(r.delay_of(RevealId(12)), None, "out of range");
    }

    #[test]
    fn prepare_hides_and_staggers() {
        let r = rule(&[RevealGroup::Card, RevealGroup::Card]);
        let effects = r.prepare();
        assert_eq!(effects.len(), 8, "four styles per element");
        assert_eq!(
            effects[1],
            Effect::SetStyle {
                target: Target::Reveal(RevealId(0)),
                property: "transform",
                value: "translateY(20px)".to_string(),
            }
        );
        assert_eq!(
            effects[7],
            Effect::SetStyle {
                target: Target::Reveal(RevealId(1)),
                property: "transition-delay",
                value: "0.1s".to_string(),
            }
        );
    }

    #[test]
    fn first_intersection_reveals_and_unobserves() {
        let mut r = rule(&[RevealGroup::Card, RevealGroup::Logo]);
        let (effects, ids) = r.on_intersection(&[
            IntersectionEntry::left(RevealId(0)),
            IntersectionEntry::entered(RevealId(1)),
        ]);
        assert_eq!(ids, [RevealId(1)]);
        assert_eq!(
            effects,
            [
                Effect::AddClass {
                    target: Target::Reveal(RevealId(1)),
                    class: "animate-in",
                },
                Effect::Unobserve(Target::Reveal(RevealId(1))),
            ]
        );
        assert!(!r.is_revealed(RevealId(0)), "leaving never reveals");
        assert!(r.is_revealed(RevealId(1)), "entered");
    }

    #[test]
    fn reveal_is_monotonic() {
        let mut r = rule(&[RevealGroup::Card]);
        let _ = r.on_intersection(&[IntersectionEntry::entered(RevealId(0))]);
        for entry in [
            IntersectionEntry::left(RevealId(0)),
            IntersectionEntry::entered(RevealId(0)),
            IntersectionEntry::left(RevealId(0)),
        ] {
            let (effects, ids) = r.on_intersection(&[entry]);
            assert!(effects.is_empty(), "no work after reveal");
            assert!(ids.is_empty(), "not revealed twice");
            assert!(r.is_revealed(RevealId(0)), "stays revealed");
        }
        assert_eq!(r.revealed_count(), 1);
        assert!(r.prepare().is_empty(), "revealed elements keep their final style");
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut r = rule(&[]);
        assert!(r.is_empty(), "no elements");
        let (effects, _) = r.on_intersection(&[IntersectionEntry::entered(RevealId(4))]);
        assert!(effects.is_empty(), "missing element is inert");
    }

    #[test]
    fn css_seconds_avoids_float_noise() {
        assert_eq!(css_seconds(Duration::from_millis(300)), "0.3s");
        assert_eq!(css_seconds(Duration::ZERO), "0s");
        assert_eq!(css_seconds(Duration::from_millis(640)), "0.64s");
    }
}
