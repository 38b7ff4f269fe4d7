//! Pointer parallax.
//!
//! Every registered element drifts with the pointer, anywhere in the
//! viewport. The offset is a pure function of pointer position, viewport size
//! and the element's depth; nothing is stored between moves.

use std::rc::Rc;

use crate::geom::{Coord, Offset, Size, ViewportSpace};
use crate::pointer::SharedPointer;
use crate::registry::{Handle, Registry};
use crate::surface::MotionTarget;

pub const DEFAULT_DEPTH: f64 = 0.1;

/// Edge displacement in pixels for depth 1.
pub const DEFAULT_AMPLITUDE_PX: f64 = 20.0;

/// Registry kind for parallax elements.
pub enum Parallax {}

struct ParallaxElement {
    target: Rc<dyn MotionTarget>,
    depth: f64,
}

/// Offset for one element.
///
/// The pointer is normalized to `[-1, 1]` on both axes around the viewport
/// center, then scaled by `depth * amplitude`. An empty viewport yields zero.
pub fn offset_for(
    depth: f64,
    pointer: Coord<ViewportSpace>,
    viewport: Size<ViewportSpace>,
    amplitude: f64,
) -> Offset {
    if viewport.is_empty() {
        return Offset::zero();
    }
    let nx = (pointer.x / viewport.width - 0.5) * 2.0;
    let ny = (pointer.y / viewport.height - 0.5) * 2.0;
    Offset::new(nx * depth * amplitude, ny * depth * amplitude)
}

pub struct ParallaxLayer {
    pointer: SharedPointer,
    viewport: Size<ViewportSpace>,
    amplitude: f64,
    elements: Registry<Parallax, ParallaxElement>,
}

impl ParallaxLayer {
    pub fn new(pointer: SharedPointer, viewport: Size<ViewportSpace>, amplitude: f64) -> Self {
        Self {
            pointer,
            viewport,
            amplitude,
            elements: Registry::new(),
        }
    }

    pub fn register(&mut self, target: Rc<dyn MotionTarget>, depth: f64) -> Handle<Parallax> {
        let depth = if depth.is_finite() {
            depth
        } else {
            DEFAULT_DEPTH
        };
        self.elements.insert(ParallaxElement { target, depth })
    }

    /// Forget the element, returning it to rest.
    pub fn unregister(&mut self, handle: Handle<Parallax>) {
        if let Some(element) = self.elements.remove(handle) {
            element.target.translate(Offset::zero());
        }
    }

    pub fn set_viewport(&mut self, viewport: Size<ViewportSpace>) {
        log::debug!(
            "[PARALLAX] viewport {}x{}",
            viewport.width,
            viewport.height
        );
        self.viewport = viewport;
    }

    /// Re-evaluate every element against the current pointer.
    pub fn pointer_moved(&self) {
        let Some(pointer) = self.pointer.position() else {
            return;
        };
        for (_, element) in self.elements.iter() {
            let offset = offset_for(element.depth, pointer, self.viewport, self.amplitude);
            element.target.translate(offset);
        }
    }

    /// Current offset of one element, if the pointer is known.
    pub fn displacement(&self, handle: Handle<Parallax>) -> Option<Offset> {
        let pointer = self.pointer.position()?;
        let element = self.elements.get(handle)?;
        Some(offset_for(
            element.depth,
            pointer,
            self.viewport,
            self.amplitude,
        ))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::PointerTracker;
    use crate::surface::testing::FakeElement;

    fn viewport() -> Size<ViewportSpace> {
        Size::new(1920.0, 1080.0)
    }

    #[test]
    fn test_center_is_rest() {
        let offset = offset_for(0.1, Coord::new(960.0, 540.0), viewport(), 20.0);
        assert_eq!(offset.x, 0.0);
        assert_eq!(offset.y, 0.0);
    }

    #[test]
    fn test_top_left_corner() {
        let offset = offset_for(0.1, Coord::new(0.0, 0.0), viewport(), 20.0);
        assert!((offset.x - -2.0).abs() < 1e-12);
        assert!((offset.y - -2.0).abs() < 1e-12);
    }

    #[test]
    fn test_bottom_right_corner_scales_with_depth() {
        let offset = offset_for(0.5, Coord::new(1920.0, 1080.0), viewport(), 20.0);
        assert!((offset.x - 10.0).abs() < 1e-12);
        assert!((offset.y - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_viewport_is_zero() {
        let offset = offset_for(0.1, Coord::new(10.0, 10.0), Size::new(0.0, 0.0), 20.0);
        assert!(offset.is_zero());
    }

    #[test]
    fn test_layer_applies_to_every_element() {
        let pointer = PointerTracker::shared();
        let near = Rc::new(FakeElement::default());
        let far = Rc::new(FakeElement::default());
        let mut layer = ParallaxLayer::new(pointer.clone(), viewport(), DEFAULT_AMPLITUDE_PX);
        layer.register(near.clone(), 0.1);
        let far_handle = layer.register(far.clone(), 0.4);

        // No pointer yet: nothing written
        layer.pointer_moved();
        assert!(near.translations.borrow().is_empty());

        pointer.update(0.0, 540.0);
        layer.pointer_moved();

        let n = near.last_translation().unwrap();
        let f = far.last_translation().unwrap();
        assert!((n.x - -2.0).abs() < 1e-12);
        assert!((f.x - -8.0).abs() < 1e-12);
        assert_eq!(n.y, 0.0);
        assert_eq!(layer.displacement(far_handle), Some(f));
    }

    #[test]
    fn test_resize_changes_normalization() {
        let pointer = PointerTracker::shared();
        let el = Rc::new(FakeElement::default());
        let mut layer = ParallaxLayer::new(pointer.clone(), viewport(), DEFAULT_AMPLITUDE_PX);
        let handle = layer.register(el, 0.1);

        pointer.update(960.0, 540.0);
        assert!(layer.displacement(handle).unwrap().is_zero());

        layer.set_viewport(Size::new(960.0, 540.0));
        let d = layer.displacement(handle).unwrap();
        assert!((d.x - 2.0).abs() < 1e-12);
        assert!((d.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_depth_uses_default() {
        let pointer = PointerTracker::shared();
        let mut layer = ParallaxLayer::new(pointer.clone(), viewport(), DEFAULT_AMPLITUDE_PX);
        let handle = layer.register(Rc::new(FakeElement::default()), f64::NAN);

        pointer.update(0.0, 0.0);
        let d = layer.displacement(handle).unwrap();
        assert!((d.x - -2.0).abs() < 1e-12);
    }

    #[test]
    fn test_unregister_rests_element() {
        let pointer = PointerTracker::shared();
        let el = Rc::new(FakeElement::default());
        let mut layer = ParallaxLayer::new(pointer.clone(), viewport(), DEFAULT_AMPLITUDE_PX);
        let handle = layer.register(el.clone(), 0.3);

        pointer.update(0.0, 0.0);
        layer.pointer_moved();
        layer.unregister(handle);

        assert!(layer.is_empty());
        assert_eq!(el.last_translation(), Some(Offset::zero()));
    }
}
