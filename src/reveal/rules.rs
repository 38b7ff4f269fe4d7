//! Binding configured rules to the elements they select.

use std::rc::Rc;

use super::{play_now, Reveal, RevealSpec, ScrollRevealOrchestrator};
use crate::config::{IntroRule, RevealRule};
use crate::registry::Handle;
use crate::surface::{Animatable, ElementSource};

fn erase<E: Animatable + 'static>(elements: &[Rc<E>]) -> Vec<Rc<dyn Animatable>> {
    elements
        .iter()
        .map(|el| el.clone() as Rc<dyn Animatable>)
        .collect()
}

impl ScrollRevealOrchestrator {
    /// Register everything `rule` selects.
    ///
    /// A grouped rule yields one registration per trigger element. Otherwise
    /// each match gets its own, plus one per nested zoom image.
    pub fn register_rule<S: ElementSource>(
        &mut self,
        rule: &RevealRule,
        source: &S,
    ) -> Vec<Handle<Reveal>> {
        let spec = RevealSpec::new(&rule.trigger, rule.replay, rule.tween.clone());

        if let Some(group) = &rule.group_trigger {
            let handles: Vec<_> = source
                .select(group)
                .into_iter()
                .map(|trigger| {
                    let members = source.select_within(&trigger, &rule.selector);
                    self.register_group(trigger, erase(&members), &spec, rule.stagger_s)
                })
                .collect();
            log::debug!(
                "[REVEAL] '{}' grouped under {} '{}' trigger(s)",
                rule.selector,
                handles.len(),
                group
            );
            return handles;
        }

        let elements = source.select(&rule.selector);
        let mut handles = self.register_staggered(erase(&elements), &spec, rule.stagger_s);

        if let Some(zoom) = &rule.nested_zoom {
            let zoom_spec = RevealSpec::new(&zoom.trigger, zoom.replay, zoom.tween.clone());
            for el in &elements {
                for image in source.select_within(el, &zoom.selector) {
                    handles.push(self.register(image, &zoom_spec));
                }
            }
        }

        log::debug!(
            "[REVEAL] '{}' bound {} registration(s)",
            rule.selector,
            handles.len()
        );
        handles
    }
}

/// Play an intro rule on everything it selects. Returns how many matched.
pub fn play_intro<S: ElementSource>(rule: &IntroRule, source: &S) -> usize {
    let targets = erase(&source.select(&rule.selector));
    play_now(&targets, &rule.tween, rule.stagger_s);
    targets.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RevealConfig;
    use crate::reveal::RevealPhase;
    use crate::surface::testing::{FakeElement, FakeSource};
    use crate::tween::{PlayDirection, Tween};

    const VH: f64 = 1000.0;

    fn rule(selector: &str) -> RevealRule {
        RevealConfig::default()
            .rules
            .into_iter()
            .find(|r| r.selector == selector)
            .unwrap()
    }

    fn below_fold() -> Rc<FakeElement> {
        Rc::new(FakeElement::at(0.0, 1200.0, 600.0, 400.0))
    }

    #[test]
    fn test_group_rule_cascades_inside_each_trigger() {
        let sections = [below_fold(), below_fold()];
        let first: Vec<_> = (0..2).map(|_| Rc::new(FakeElement::default())).collect();
        let second: Vec<_> = (0..2).map(|_| Rc::new(FakeElement::default())).collect();
        let source = FakeSource::default()
            .with(".portfolio", &sections)
            .with_nested(&sections[0], ".card", &first)
            .with_nested(&sections[1], ".card", &second);

        let mut reveals = ScrollRevealOrchestrator::new();
        let handles = reveals.register_rule(&rule(".card"), &source);
        assert_eq!(handles.len(), 2);
        assert!(reveals.evaluate(VH).is_empty());

        sections[0].move_to(0.0, 200.0);
        assert_eq!(reveals.evaluate(VH), vec![(handles[0], PlayDirection::Forward)]);

        for (i, card) in first.iter().enumerate() {
            let plays = card.plays.borrow();
            assert_eq!(plays.len(), 1);
            assert!((plays[0].0.delay_s - i as f64 * 0.15).abs() < 1e-12);
        }
        assert!(second.iter().all(|c| c.plays.borrow().is_empty()));
        assert!(sections.iter().all(|s| s.plays.borrow().is_empty()));
    }

    #[test]
    fn test_nested_zoom_registered_per_item() {
        let items = [below_fold(), below_fold()];
        let image = below_fold();
        let source = FakeSource::default()
            .with(".portfolio-item", &items)
            .with_nested(&items[0], "img", &[image.clone()]);

        let mut reveals = ScrollRevealOrchestrator::new();
        let handles = reveals.register_rule(&rule(".portfolio-item"), &source);
        assert_eq!(handles.len(), 3);

        // Image starts zoomed in before anything scrolls
        assert_eq!(image.prepared.borrow()[0], Tween::zoom_settle());

        // Image reveals on its own line, item 0 stays pending
        image.move_to(0.0, 830.0);
        items[0].move_to(0.0, 810.0);
        assert_eq!(reveals.evaluate(VH), vec![(handles[2], PlayDirection::Forward)]);
        assert_eq!(reveals.phase(handles[2]), Some(RevealPhase::Played));
        assert_eq!(reveals.phase(handles[0]), Some(RevealPhase::Pending));
    }

    #[test]
    fn test_missing_selector_registers_nothing() {
        let mut reveals = ScrollRevealOrchestrator::new();
        assert!(reveals
            .register_rule(&rule(".reveal"), &FakeSource::default())
            .is_empty());
        assert!(reveals
            .register_rule(&rule(".card"), &FakeSource::default())
            .is_empty());
        assert!(reveals.is_empty());
    }

    #[test]
    fn test_intro_plays_on_everything_selected() {
        let intro = RevealConfig::default().intro.remove(0);
        let lines: Vec<_> = (0..3).map(|_| Rc::new(FakeElement::default())).collect();
        let source = FakeSource::default().with(&intro.selector, &lines);

        assert_eq!(play_intro(&intro, &source), 3);
        for (i, line) in lines.iter().enumerate() {
            let plays = line.plays.borrow();
            assert_eq!(plays[0].1, PlayDirection::Forward);
            let expected = intro.tween.delay_s + i as f64 * intro.stagger_s;
            assert!((plays[0].0.delay_s - expected).abs() < 1e-12);
        }
    }
}
