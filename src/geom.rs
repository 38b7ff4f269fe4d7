//! Type-safe coordinate system for the motion layer.
//!
//! Two spaces matter here:
//!
//! ```text
//! ViewportSpace   pointer positions and element bounds (CSS pixels, client coords)
//! TranslateSpace  offsets written into an element's `translate(..)` transform
//! ```
//!
//! Each space is a phantom type so a pointer position can never be written
//! into a transform without going through one of the motion models.

use std::ops::{Add, Mul, Sub};

/// Client coordinates. `(0, 0)` is the top-left corner of the viewport.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct ViewportSpace;

/// Translation offsets relative to an element's rest position.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct TranslateSpace;

/// A 2D coordinate with an associated coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coord<TSpace> {
    pub x: f64,
    pub y: f64,
    _space: std::marker::PhantomData<TSpace>,
}

/// Displacement applied to an element's transform.
pub type Offset = Coord<TranslateSpace>;

impl<TSpace: Default> Coord<TSpace> {
    /// Create a new coordinate in the specified space.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            _space: std::marker::PhantomData,
        }
    }

    /// The origin of the space.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Linear interpolation between two coordinates.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Get the distance to another coordinate.
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl<T: Default> Add for Coord<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Default> Sub for Coord<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Default> Mul<f64> for Coord<T> {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl Coord<ViewportSpace> {
    /// Offset of this point from `origin`, as a translation.
    ///
    /// This is the only bridge between the two spaces.
    pub fn offset_from(&self, origin: Coord<ViewportSpace>) -> Offset {
        Offset::new(self.x - origin.x, self.y - origin.y)
    }
}

impl Coord<TranslateSpace> {
    /// Value for the CSS `translate` property. Unlike an inline `transform`,
    /// it composes with transforms held by running or filled animations.
    pub fn css_translate(&self) -> String {
        format!("{}px {}px", self.x, self.y)
    }
}

/// Size in a specific coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size<TSpace> {
    pub width: f64,
    pub height: f64,
    _space: std::marker::PhantomData<TSpace>,
}

impl<TSpace: Default> Size<TSpace> {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            _space: std::marker::PhantomData,
        }
    }

    /// A size with no area cannot be used to normalize positions.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// A rectangular region in a specific coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect<TSpace> {
    pub origin: Coord<TSpace>,
    pub size: Size<TSpace>,
}

impl<TSpace: Default + Copy> Rect<TSpace> {
    pub fn new(origin: Coord<TSpace>, size: Size<TSpace>) -> Self {
        Self { origin, size }
    }

    pub fn from_coords(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Coord::new(x, y), Size::new(width, height))
    }

    pub fn top(&self) -> f64 {
        self.origin.y
    }

    pub fn bottom(&self) -> f64 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Coord<TSpace> {
        Coord::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }
}

/// Element bounds as reported by `getBoundingClientRect`.
pub type Bounds = Rect<ViewportSpace>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_arithmetic() {
        let a = Coord::<ViewportSpace>::new(10.0, 20.0);
        let b = Coord::<ViewportSpace>::new(5.0, 10.0);

        let sum = a + b;
        assert!((sum.x - 15.0).abs() < 0.001);
        assert!((sum.y - 30.0).abs() < 0.001);

        let diff = a - b;
        assert!((diff.x - 5.0).abs() < 0.001);
        assert!((diff.y - 10.0).abs() < 0.001);

        let scaled = a * 2.0;
        assert!((scaled.x - 20.0).abs() < 0.001);
        assert!((scaled.y - 40.0).abs() < 0.001);
    }

    #[test]
    fn test_lerp() {
        let a = Coord::<ViewportSpace>::new(0.0, 0.0);
        let b = Coord::<ViewportSpace>::new(100.0, 100.0);

        let mid = a.lerp(b, 0.5);
        assert!((mid.x - 50.0).abs() < 0.001);
        assert!((mid.y - 50.0).abs() < 0.001);

        // t = 1 lands exactly on the target
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn test_offset_from_rect_center() {
        let rect = Bounds::from_coords(100.0, 50.0, 80.0, 40.0);
        let pointer = Coord::<ViewportSpace>::new(150.0, 66.0);

        let offset = pointer.offset_from(rect.center());
        assert_eq!(offset, Offset::new(10.0, -4.0));
    }

    #[test]
    fn test_css_translate() {
        assert_eq!(Offset::new(0.0, -6.0).css_translate(), "0px -6px");
        assert_eq!(Offset::new(2.5, 0.0).css_translate(), "2.5px 0px");
    }

    #[test]
    fn test_rect_edges() {
        let rect = Bounds::from_coords(0.0, 200.0, 300.0, 100.0);
        assert_eq!(rect.top(), 200.0);
        assert_eq!(rect.bottom(), 300.0);
    }

    #[test]
    fn test_empty_size() {
        assert!(Size::<ViewportSpace>::new(0.0, 800.0).is_empty());
        assert!(Size::<ViewportSpace>::new(f64::NAN, 800.0).is_empty());
        assert!(!Size::<ViewportSpace>::new(1280.0, 800.0).is_empty());
    }
}
