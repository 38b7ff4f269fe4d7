//! Rendering seams between the motion models and whatever displays them.
//!
//! The DOM binding implements these for `HtmlElement`s; tests implement them
//! with recording fakes.

use std::rc::Rc;

use crate::cursor::CursorFrame;
use crate::geom::{Bounds, Offset};
use crate::tween::{PlayDirection, Tween};

/// An element whose transform the motion layer owns.
pub trait MotionTarget {
    /// Current layout bounds. Read fresh on every call.
    fn bounds(&self) -> Bounds;

    /// Write the element's translation.
    fn translate(&self, offset: Offset);
}

/// An element that can hand a tween to the animation timeline.
pub trait Animatable {
    fn bounds(&self) -> Bounds;

    /// Show the tween's start state right away, before anything plays.
    fn prepare(&self, tween: &Tween);

    fn play(&self, tween: &Tween, direction: PlayDirection);
}

/// Looks up elements by CSS selector.
pub trait ElementSource {
    type Element: Animatable + 'static;

    /// Every match in the document, in document order.
    fn select(&self, selector: &str) -> Vec<Rc<Self::Element>>;

    /// Matches among the descendants of `scope`.
    fn select_within(&self, scope: &Self::Element, selector: &str) -> Vec<Rc<Self::Element>>;
}

/// The two cursor nodes.
pub trait CursorSurface {
    fn render(&self, frame: &CursorFrame);
}
