//! Two-part custom cursor.
//!
//! The inner mark snaps to the pointer every frame. The outer ring chases it
//! with a fixed per-frame lerp:
//!
//! ```text
//! eased' = eased + n * (target - eased)      n = 0.18
//! ```
//!
//! which is a discrete exponential decay: the remaining distance shrinks by
//! `1 - n` per frame. The rate depends on frame cadence; at a steady 60fps it
//! reads as a soft spring, but it is not a physical one.
//!
//! Startup: nothing is shown until the first pointer event. On the first
//! frame that sees a pointer the ring snaps onto it instead of sweeping in
//! from the viewport origin.

use crate::config::{CursorConfig, RingStyle};
use crate::geom::{Coord, ViewportSpace};
use crate::pointer::SharedPointer;
use crate::scheduler::FrameTask;
use crate::surface::CursorSurface;

/// What the cursor nodes should show this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorFrame {
    /// False until the pointer has been seen.
    pub visible: bool,
    pub inner: Coord<ViewportSpace>,
    pub outer: Coord<ViewportSpace>,
    pub ring: RingStyle,
}

impl CursorFrame {
    fn hidden(ring: RingStyle) -> Self {
        Self {
            visible: false,
            inner: Coord::zero(),
            outer: Coord::zero(),
            ring,
        }
    }
}

pub struct CursorRenderer {
    pointer: SharedPointer,
    surface: Box<dyn CursorSurface>,
    ease_factor: f64,
    idle_ring: RingStyle,
    active_ring: RingStyle,
    eased: Option<Coord<ViewportSpace>>,
    /// Interactive elements currently under the pointer (nesting-aware).
    hovered: u32,
    last_frame: CursorFrame,
}

impl CursorRenderer {
    pub fn new(
        pointer: SharedPointer,
        surface: Box<dyn CursorSurface>,
        config: &CursorConfig,
    ) -> Self {
        let ease_factor = if config.ease_factor > 0.0 && config.ease_factor <= 1.0 {
            config.ease_factor
        } else {
            log::warn!(
                "[CURSOR] ease factor {} outside (0, 1], using 0.18",
                config.ease_factor
            );
            CursorConfig::default().ease_factor
        };

        Self {
            pointer,
            surface,
            ease_factor,
            idle_ring: config.idle_ring,
            active_ring: config.active_ring,
            eased: None,
            hovered: 0,
            last_frame: CursorFrame::hidden(config.idle_ring),
        }
    }

    /// Advance one frame and push the result to the surface.
    pub fn tick(&mut self) -> CursorFrame {
        let ring = self.ring_style();

        let frame = match self.pointer.position() {
            None => {
                // Re-entry snaps like the first sighting
                self.eased = None;
                CursorFrame::hidden(ring)
            },
            Some(target) => {
                let eased = match self.eased {
                    None => target,
                    Some(eased) => eased.lerp(target, self.ease_factor),
                };
                self.eased = Some(eased);
                CursorFrame {
                    visible: true,
                    inner: target,
                    outer: eased,
                    ring,
                }
            },
        };

        self.surface.render(&frame);
        self.last_frame = frame;
        frame
    }

    /// Pointer entered an interactive element.
    pub fn interactive_enter(&mut self) {
        self.hovered = self.hovered.saturating_add(1);
    }

    /// Pointer left an interactive element.
    pub fn interactive_leave(&mut self) {
        self.hovered = self.hovered.saturating_sub(1);
    }

    pub fn is_enlarged(&self) -> bool {
        self.hovered > 0
    }

    pub fn ring_style(&self) -> RingStyle {
        if self.is_enlarged() {
            self.active_ring
        } else {
            self.idle_ring
        }
    }

    pub fn eased_position(&self) -> Option<Coord<ViewportSpace>> {
        self.eased
    }

    /// The frame produced by the most recent tick.
    pub fn frame(&self) -> CursorFrame {
        self.last_frame
    }
}

impl FrameTask for CursorRenderer {
    fn on_frame(&mut self, _timestamp_ms: f64) {
        let frame = self.tick();
        log::trace!(
            "[CURSOR] frame visible={} outer=({:.1}, {:.1})",
            frame.visible,
            frame.outer.x,
            frame.outer.y
        );
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::pointer::PointerTracker;
    use crate::scheduler::{ManualScheduler, Scheduler};
    use crate::surface::testing::FakeCursor;

    struct SharedFake(Rc<FakeCursor>);

    impl CursorSurface for SharedFake {
        fn render(&self, frame: &CursorFrame) {
            self.0.render(frame);
        }
    }

    fn renderer() -> (SharedPointer, Rc<FakeCursor>, CursorRenderer) {
        let pointer = PointerTracker::shared();
        let fake = Rc::new(FakeCursor::default());
        let renderer = CursorRenderer::new(
            pointer.clone(),
            Box::new(SharedFake(fake.clone())),
            &CursorConfig::default(),
        );
        (pointer, fake, renderer)
    }

    #[test]
    fn test_hidden_before_first_pointer_event() {
        let (_pointer, fake, mut renderer) = renderer();

        for _ in 0..3 {
            assert!(!renderer.tick().visible);
        }
        assert_eq!(renderer.eased_position(), None);
        assert!(fake.frames.borrow().iter().all(|f| !f.visible));
    }

    #[test]
    fn test_first_sighting_snaps_ring() {
        let (pointer, _fake, mut renderer) = renderer();
        pointer.update(400.0, 300.0);

        let frame = renderer.tick();
        assert!(frame.visible);
        assert_eq!(frame.inner, Coord::new(400.0, 300.0));
        assert_eq!(frame.outer, Coord::new(400.0, 300.0));
    }

    #[test]
    fn test_reentry_after_clear_snaps_ring() {
        let (pointer, _fake, mut renderer) = renderer();
        pointer.update(0.0, 0.0);
        renderer.tick();

        pointer.clear();
        assert!(!renderer.tick().visible);
        assert_eq!(renderer.eased_position(), None);

        pointer.update(1000.0, 500.0);
        let frame = renderer.tick();
        assert!(frame.visible);
        assert_eq!(frame.outer, Coord::new(1000.0, 500.0));
    }

    #[test]
    fn test_inner_snaps_outer_eases() {
        let (pointer, _fake, mut renderer) = renderer();
        pointer.update(0.0, 0.0);
        renderer.tick();

        pointer.update(100.0, 50.0);
        let frame = renderer.tick();
        assert_eq!(frame.inner, Coord::new(100.0, 50.0));
        assert!((frame.outer.x - 18.0).abs() < 1e-9);
        assert!((frame.outer.y - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_geometric_convergence() {
        let (pointer, _fake, mut renderer) = renderer();
        pointer.update(0.0, 0.0);
        renderer.tick();

        let target = Coord::new(500.0, -200.0);
        pointer.update(target.x, target.y);

        let mut prev = Coord::<ViewportSpace>::zero().distance(&target);
        let mut ticks = 0;
        while prev > 0.01 {
            let outer = renderer.tick().outer;
            let dist = outer.distance(&target);
            assert!(dist <= prev);
            assert!((dist - prev * 0.82).abs() < 1e-6);
            prev = dist;
            ticks += 1;
            assert!(ticks < 100, "ring failed to converge");
        }
        // 538.5 * 0.82^n < 0.01  =>  n = 55
        assert_eq!(ticks, 55);
    }

    #[test]
    fn test_ring_enlarges_over_interactive() {
        let (pointer, _fake, mut renderer) = renderer();
        pointer.update(10.0, 10.0);

        assert_eq!(renderer.tick().ring, RingStyle::IDLE);

        renderer.interactive_enter();
        assert_eq!(renderer.tick().ring, RingStyle::ACTIVE);

        renderer.interactive_leave();
        assert_eq!(renderer.tick().ring, RingStyle::IDLE);
    }

    #[test]
    fn test_nested_interactive_stays_enlarged() {
        let (_pointer, _fake, mut renderer) = renderer();

        // Card containing a button
        renderer.interactive_enter();
        renderer.interactive_enter();
        renderer.interactive_leave();
        assert!(renderer.is_enlarged());
        renderer.interactive_leave();
        assert!(!renderer.is_enlarged());

        // Unbalanced leave saturates
        renderer.interactive_leave();
        assert!(!renderer.is_enlarged());
    }

    #[test]
    fn test_invalid_ease_factor_falls_back() {
        let pointer = PointerTracker::shared();
        let config = CursorConfig {
            ease_factor: 1.5,
            ..Default::default()
        };
        let mut renderer =
            CursorRenderer::new(pointer.clone(), Box::new(FakeCursor::default()), &config);

        pointer.update(0.0, 0.0);
        renderer.tick();
        pointer.update(100.0, 0.0);
        assert!((renderer.tick().outer.x - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_driven_by_scheduler() {
        let (pointer, fake, renderer) = renderer();
        let renderer = Rc::new(RefCell::new(renderer));
        let mut scheduler = ManualScheduler::new(renderer.clone());

        pointer.update(50.0, 50.0);
        scheduler.start();
        scheduler.run_frames(5);
        scheduler.stop();
        scheduler.run_frames(5);

        assert_eq!(fake.frames.borrow().len(), 5);
        assert_eq!(renderer.borrow().frame().outer, Coord::new(50.0, 50.0));
    }
}
