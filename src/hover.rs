//! Hover lift for cards: a fixed vertical nudge while the pointer is over them.

use std::rc::Rc;

use crate::geom::Offset;
use crate::registry::{Handle, Registry};
use crate::surface::MotionTarget;

/// Registry kind for lifted elements.
pub enum Lift {}

pub struct HoverLift {
    lift: Offset,
    elements: Registry<Lift, Rc<dyn MotionTarget>>,
}

impl HoverLift {
    /// `lift_px` is the vertical offset while hovered; negative moves up.
    pub fn new(lift_px: f64) -> Self {
        Self {
            lift: Offset::new(0.0, lift_px),
            elements: Registry::new(),
        }
    }

    pub fn register(&mut self, target: Rc<dyn MotionTarget>) -> Handle<Lift> {
        self.elements.insert(target)
    }

    pub fn unregister(&mut self, handle: Handle<Lift>) {
        if let Some(target) = self.elements.remove(handle) {
            target.translate(Offset::zero());
        }
    }

    pub fn enter(&self, handle: Handle<Lift>) {
        if let Some(target) = self.elements.get(handle) {
            target.translate(self.lift);
        }
    }

    pub fn leave(&self, handle: Handle<Lift>) {
        if let Some(target) = self.elements.get(handle) {
            target.translate(Offset::zero());
        }
    }
}
