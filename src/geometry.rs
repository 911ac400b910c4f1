//! Plain 2D value types shared by input payloads and user components.
//!
//! Screen-space positions are normalized to `0.0..=1.0` on both axes by the device collaborators.

use std::ops;

/// A 2D point or vector.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Point {
    /// The horizontal coordinate.
    pub x: f32,
    /// The vertical coordinate.
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Sentinel reported by devices that have not sampled a real position yet.
    pub const UNUSED: Self = Self::new(-1.0, -1.0);

    /// Creates a point.
    pub const fn new(x: f32, y: f32) -> Self { Self { x, y } }

    /// Whether this is a real sample rather than [`Point::UNUSED`].
    pub fn is_used(self) -> bool { self != Self::UNUSED }
}

impl ops::Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self { Self::new(self.x + rhs.x, self.y + rhs.y) }
}

impl ops::AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) { *self = *self + rhs; }
}

impl ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self { Self::new(self.x - rhs.x, self.y - rhs.y) }
}

impl ops::Mul<f32> for Point {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self { Self::new(self.x * rhs, self.y * rhs) }
}

/// An axis-aligned rectangle.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rectangle {
    /// The minimum horizontal coordinate.
    pub left:   f32,
    /// The minimum vertical coordinate.
    pub top:    f32,
    /// The horizontal extent.
    pub width:  f32,
    /// The vertical extent.
    pub height: f32,
}

impl Rectangle {
    /// A zero-sized rectangle at the origin.
    pub const EMPTY: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// The whole normalized screen.
    pub const ONE: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Creates a rectangle.
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// Creates the smallest rectangle containing both corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let left = a.x.min(b.x);
        let top = a.y.min(b.y);
        Self::new(left, top, a.x.max(b.x) - left, a.y.max(b.y) - top)
    }

    /// The maximum horizontal coordinate.
    pub fn right(&self) -> f32 { self.left + self.width }

    /// The maximum vertical coordinate.
    pub fn bottom(&self) -> f32 { self.top + self.height }

    /// The top-left corner.
    pub fn top_left(&self) -> Point { Point::new(self.left, self.top) }

    /// The size of the rectangle as a vector.
    pub fn size(&self) -> Point { Point::new(self.width, self.height) }

    /// Whether `point` lies inside the rectangle, edges inclusive.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rectangle};

    #[test]
    fn test_from_corners_normalizes_order() {
        let rect = Rectangle::from_corners(Point::new(0.5, 0.75), Point::new(0.25, 0.25));
        assert_eq!(rect, Rectangle::new(0.25, 0.25, 0.25, 0.5));
    }

    #[test]
    fn test_contains_edges() {
        let rect = Rectangle::new(0.25, 0.25, 0.5, 0.5);
        assert!(rect.contains(Point::new(0.25, 0.75)));
        assert!(!rect.contains(Point::new(0.8, 0.5)));
        assert!(!rect.contains(Point::UNUSED));
    }
}
