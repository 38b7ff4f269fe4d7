//! Magnetic hover: elements lean toward the pointer while hovered.
//!
//! Each element is a two-state machine:
//!
//! - `Idle`: displacement is exactly zero, moves are ignored
//! - `Hovering`: displacement = (pointer - box center) * strength
//!
//! Bounds are re-read on every move because layout can shift under the
//! pointer. Leaving snaps straight back to zero; any eased return is the
//! stylesheet's business, not ours.

use std::rc::Rc;

use crate::geom::Offset;
use crate::pointer::SharedPointer;
use crate::registry::{Handle, Registry};
use crate::surface::MotionTarget;

/// Strength used when none (or an out-of-range one) is configured.
pub const DEFAULT_STRENGTH: f64 = 0.3;

/// Registry kind for magnetic elements.
pub enum Magnet {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagnetState {
    Idle,
    Hovering,
}

struct MagneticElement {
    target: Rc<dyn MotionTarget>,
    strength: f64,
    state: MagnetState,
    displacement: Offset,
}

impl MagneticElement {
    fn rest(&mut self) {
        self.state = MagnetState::Idle;
        self.displacement = Offset::zero();
        self.target.translate(self.displacement);
    }
}

pub struct MagneticFieldController {
    pointer: SharedPointer,
    elements: Registry<Magnet, MagneticElement>,
}

impl MagneticFieldController {
    pub fn new(pointer: SharedPointer) -> Self {
        Self {
            pointer,
            elements: Registry::new(),
        }
    }

    /// Register an element. Strength must lie in `(0, 1]`.
    pub fn register(&mut self, target: Rc<dyn MotionTarget>, strength: f64) -> Handle<Magnet> {
        let strength = if strength > 0.0 && strength <= 1.0 {
            strength
        } else {
            log::warn!(
                "[MAGNETIC] strength {} outside (0, 1], using {}",
                strength,
                DEFAULT_STRENGTH
            );
            DEFAULT_STRENGTH
        };

        self.elements.insert(MagneticElement {
            target,
            strength,
            state: MagnetState::Idle,
            displacement: Offset::zero(),
        })
    }

    /// Return the element to rest and forget it.
    pub fn unregister(&mut self, handle: Handle<Magnet>) {
        if let Some(mut element) = self.elements.remove(handle) {
            element.rest();
        }
    }

    pub fn pointer_enter(&mut self, handle: Handle<Magnet>) {
        if let Some(element) = self.elements.get_mut(handle) {
            element.state = MagnetState::Hovering;
        }
    }

    pub fn pointer_move(&mut self, handle: Handle<Magnet>) {
        let Some(pointer) = self.pointer.position() else {
            return;
        };
        let Some(element) = self.elements.get_mut(handle) else {
            return;
        };
        if element.state != MagnetState::Hovering {
            return;
        }

        let center = element.target.bounds().center();
        element.displacement = pointer.offset_from(center) * element.strength;
        element.target.translate(element.displacement);
    }

    pub fn pointer_leave(&mut self, handle: Handle<Magnet>) {
        if let Some(element) = self.elements.get_mut(handle) {
            element.rest();
        }
    }

    pub fn displacement(&self, handle: Handle<Magnet>) -> Option<Offset> {
        self.elements.get(handle).map(|e| e.displacement)
    }

    pub fn state(&self, handle: Handle<Magnet>) -> Option<MagnetState> {
        self.elements.get(handle).map(|e| e.state)
    }

    pub fn is_hovering(&self, handle: Handle<Magnet>) -> bool {
        self.state(handle) == Some(MagnetState::Hovering)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
