//! Scroll reveal orchestration.
//!
//! Decides *when* a reveal fires and *which way*; the tween itself runs on
//! the element's [`Animatable`] timeline. Each registration is a small state
//! machine:
//!
//! ```text
//! Once:    Pending --enter--> Played
//! Toggle:  Pending --enter--> Played --exit--> Pending --enter--> ...
//! ```
//!
//! Crossings come either from [`ScrollRevealOrchestrator::notify`] (any
//! intersection source) or from [`ScrollRevealOrchestrator::evaluate`], which
//! derives them from element bounds on scroll.

mod rules;
mod trigger;

pub use rules::play_intro;
pub use trigger::{Crossing, Edge, TriggerPoint};

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::registry::{Handle, Registry};
use crate::surface::Animatable;
use crate::tween::{PlayDirection, Tween};

/// Registry kind for reveal registrations.
pub enum Reveal {}

/// What happens when an element scrolls back above its trigger line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/")]
pub enum ReplayPolicy {
    /// Play once and stay revealed.
    Once,
    /// Reverse on exit, replay on re-entry.
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Pending,
    Played,
}

/// How one registration reacts to its trigger line.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealSpec {
    pub trigger: TriggerPoint,
    pub replay: ReplayPolicy,
    pub tween: Tween,
}

impl RevealSpec {
    pub fn new(trigger: &str, replay: ReplayPolicy, tween: Tween) -> Self {
        Self {
            trigger: TriggerPoint::parse_or_default(trigger),
            replay,
            tween,
        }
    }
}

/// Start delays for a cascade: `base + i * step`.
pub fn stagger_delays(base: f64, step: f64, count: usize) -> impl Iterator<Item = f64> {
    (0..count).map(move |i| base + i as f64 * step)
}

struct RevealTarget {
    /// Element whose bounds are compared against the line.
    trigger_el: Rc<dyn Animatable>,
    /// Elements animated when the line is crossed, with their own delays.
    members: Vec<(Rc<dyn Animatable>, Tween)>,
    trigger: TriggerPoint,
    replay: ReplayPolicy,
    phase: RevealPhase,
    /// Side of the line at the last evaluation; `None` before the first.
    past_line: Option<bool>,
}

#[derive(Default)]
pub struct ScrollRevealOrchestrator {
    targets: Registry<Reveal, RevealTarget>,
}

impl ScrollRevealOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(
        &mut self,
        trigger_el: Rc<dyn Animatable>,
        members: Vec<(Rc<dyn Animatable>, Tween)>,
        spec: &RevealSpec,
    ) -> Handle<Reveal> {
        // Hidden from the start, not only once the line is crossed
        for (member, tween) in &members {
            member.prepare(tween);
        }
        self.targets.insert(RevealTarget {
            trigger_el,
            members,
            trigger: spec.trigger,
            replay: spec.replay,
            phase: RevealPhase::Pending,
            past_line: None,
        })
    }

    /// Reveal an element on its own trigger.
    pub fn register(&mut self, target: Rc<dyn Animatable>, spec: &RevealSpec) -> Handle<Reveal> {
        let members = vec![(target.clone(), spec.tween.clone())];
        self.insert(target, members, spec)
    }

    /// Register each element on its own trigger, delaying element `i` by
    /// `i * step` on top of the tween's delay.
    pub fn register_staggered(
        &mut self,
        targets: Vec<Rc<dyn Animatable>>,
        spec: &RevealSpec,
        step: f64,
    ) -> Vec<Handle<Reveal>> {
        let delays = stagger_delays(spec.tween.delay_s, step, targets.len());
        targets
            .into_iter()
            .zip(delays)
            .map(|(target, delay)| {
                let members = vec![(target.clone(), spec.tween.clone().with_delay(delay))];
                self.insert(target, members, spec)
            })
            .collect()
    }

    /// One trigger element cascading over `members`.
    pub fn register_group(
        &mut self,
        trigger: Rc<dyn Animatable>,
        members: Vec<Rc<dyn Animatable>>,
        spec: &RevealSpec,
        step: f64,
    ) -> Handle<Reveal> {
        let delays = stagger_delays(spec.tween.delay_s, step, members.len());
        let members = members
            .into_iter()
            .zip(delays)
            .map(|(member, delay)| (member, spec.tween.clone().with_delay(delay)))
            .collect();
        self.insert(trigger, members, spec)
    }

    /// Zoom an image from 115% to rest on its own trigger, independent of any
    /// reveal on its container.
    pub fn register_zoom(
        &mut self,
        image: Rc<dyn Animatable>,
        trigger: TriggerPoint,
        replay: ReplayPolicy,
    ) -> Handle<Reveal> {
        let spec = RevealSpec {
            trigger,
            replay,
            tween: Tween::zoom_settle(),
        };
        self.register(image, &spec)
    }

    pub fn unregister(&mut self, handle: Handle<Reveal>) {
        self.targets.remove(handle);
    }

    /// Apply a crossing. Returns the direction played, if anything played.
    pub fn notify(&mut self, handle: Handle<Reveal>, crossing: Crossing) -> Option<PlayDirection> {
        let target = self.targets.get_mut(handle)?;

        let direction = match (crossing, target.phase, target.replay) {
            (Crossing::Enter, RevealPhase::Pending, _) => {
                target.phase = RevealPhase::Played;
                PlayDirection::Forward
            },
            (Crossing::Exit, RevealPhase::Played, ReplayPolicy::Toggle) => {
                target.phase = RevealPhase::Pending;
                PlayDirection::Reverse
            },
            _ => return None,
        };

        log::debug!(
            "[REVEAL] {:?} {:?} -> {:?} ({} element(s))",
            handle,
            crossing,
            direction,
            target.members.len()
        );

        for (member, tween) in &target.members {
            match direction {
                PlayDirection::Forward => member.play(tween, direction),
                // Reversal starts at once; the stagger belongs to the entrance.
                PlayDirection::Reverse => member.play(&tween.clone().with_delay(0.0), direction),
            }
        }

        Some(direction)
    }

    /// Derive crossings from current bounds and apply them.
    ///
    /// Call on scroll and resize. Returns what fired, in registration order.
    pub fn evaluate(&mut self, viewport_height: f64) -> Vec<(Handle<Reveal>, PlayDirection)> {
        let crossings: Vec<_> = self
            .targets
            .iter_mut()
            .filter_map(|(handle, target)| {
                let now = target
                    .trigger
                    .is_past(&target.trigger_el.bounds(), viewport_height);
                let crossing = Crossing::between(target.past_line, now);
                target.past_line = Some(now);
                crossing.map(|c| (handle, c))
            })
            .collect();

        crossings
            .into_iter()
            .filter_map(|(handle, crossing)| {
                self.notify(handle, crossing)
                    .map(|direction| (handle, direction))
            })
            .collect()
    }

    pub fn phase(&self, handle: Handle<Reveal>) -> Option<RevealPhase> {
        self.targets.get(handle).map(|t| t.phase)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Play a tween right away on each target, staggered by index.
///
/// Used for the intro sequence and ambient loops, which have no trigger.
pub fn play_now(targets: &[Rc<dyn Animatable>], tween: &Tween, step: f64) {
    let delays = stagger_delays(tween.delay_s, step, targets.len());
    for (target, delay) in targets.iter().zip(delays) {
        target.play(&tween.clone().with_delay(delay), PlayDirection::Forward);
    }
}
