//! Shared pointer state.
//!
//! One [`PointerTracker`] exists per mounted layer and is handed to every
//! consumer as an `Rc`. It has a single writer (the pointer-move listener) and
//! many readers; the host is single-threaded, so a `Cell` is enough.
//!
//! Startup: the position is unset until the first pointer event. Consumers
//! treat an unset pointer as "nothing to draw" rather than as the origin.

use std::cell::Cell;
use std::rc::Rc;

use crate::geom::{Coord, ViewportSpace};

/// Pointer tracker shared between the cursor, magnetic and parallax models.
pub type SharedPointer = Rc<PointerTracker>;

#[derive(Debug, Default)]
pub struct PointerTracker {
    position: Cell<Option<Coord<ViewportSpace>>>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedPointer {
        Rc::new(Self::new())
    }

    /// Overwrite the current position. No buffering: the last write wins.
    pub fn update(&self, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            log::trace!("[POINTER] ignoring non-finite position ({}, {})", x, y);
            return;
        }
        self.position.set(Some(Coord::new(x, y)));
    }

    /// Latest position, or `None` before the first event.
    pub fn position(&self) -> Option<Coord<ViewportSpace>> {
        self.position.get()
    }

    pub fn is_tracking(&self) -> bool {
        self.position.get().is_some()
    }

    /// Forget the position, e.g. when the pointer leaves the document.
    pub fn clear(&self) {
        self.position.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_until_first_event() {
        let pointer = PointerTracker::new();
        assert!(!pointer.is_tracking());
        assert_eq!(pointer.position(), None);

        pointer.update(12.0, 34.0);
        assert_eq!(pointer.position(), Some(Coord::new(12.0, 34.0)));
    }

    #[test]
    fn test_last_write_wins() {
        let pointer = PointerTracker::shared();
        let reader = Rc::clone(&pointer);

        for i in 0..10 {
            pointer.update(i as f64, -(i as f64));
        }
        assert_eq!(reader.position(), Some(Coord::new(9.0, -9.0)));
    }

    #[test]
    fn test_non_finite_is_ignored() {
        let pointer = PointerTracker::new();
        pointer.update(5.0, 5.0);
        pointer.update(f64::NAN, 1.0);
        assert_eq!(pointer.position(), Some(Coord::new(5.0, 5.0)));
    }

    #[test]
    fn test_clear() {
        let pointer = PointerTracker::new();
        pointer.update(1.0, 2.0);
        pointer.clear();
        assert!(!pointer.is_tracking());
    }
}
