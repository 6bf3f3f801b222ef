//! 2D geometric primitives for truss modelling.

use serde::{Deserialize, Serialize};

/// Absolute tolerance used for floating point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Tests whether two numbers are closer than `tolerance` from each other.
pub fn close_enough(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}

/// Position in the 2D plane.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Point {
    /// Coordinate along the global X axis.
    pub x: f64,
    /// Coordinate along the global Y axis.
    pub y: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance between this point and `other`.
    #[must_use]
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// The point resulting from displacing this one by `vector`
    /// applied `scale` times.
    #[must_use]
    pub fn displaced(&self, vector: Vector2, scale: f64) -> Point {
        Point::new(self.x + scale * vector.x, self.y + scale * vector.y)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        close_enough(self.x, other.x, TOLERANCE) && close_enough(self.y, other.y, TOLERANCE)
    }
}

/// Direction in the 2D plane, defined by its two projections.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Vector2 {
    /// Projection along the global X axis.
    pub x: f64,
    /// Projection along the global Y axis.
    pub y: f64,
}

impl Vector2 {
    /// Create a [`Vector2`] with explicit projections.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The zero vector.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// The norm (length) of the vector.
    #[must_use]
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Cosine of the angle between the vector and the horizontal axis.
    #[must_use]
    pub fn cosine(&self) -> f64 {
        self.x / self.norm()
    }

    /// Sine of the angle between the vector and the horizontal axis.
    #[must_use]
    pub fn sine(&self) -> f64 {
        self.y / self.norm()
    }

    /// A new vector with the same direction scaled by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Vector2 {
        Vector2::new(factor * self.x, factor * self.y)
    }

    /// A new vector with the same direction and unit length.
    #[must_use]
    pub fn normalized(&self) -> Vector2 {
        self.scaled(1.0 / self.norm())
    }

    /// A new vector with the same direction and the given `length`.
    #[must_use]
    pub fn with_length(&self, length: f64) -> Vector2 {
        self.normalized().scaled(length)
    }

    /// The vector pointing in the opposite direction.
    #[must_use]
    pub fn opposite(&self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl std::ops::Add for Vector2 {
    type Output = Vector2;

    fn add(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x - other.x, self.y - other.y)
    }
}

impl PartialEq for Vector2 {
    fn eq(&self, other: &Self) -> bool {
        close_enough(self.x, other.x, TOLERANCE) && close_enough(self.y, other.y, TOLERANCE)
    }
}

/// Vector going from point `p` to point `q`.
#[must_use]
pub fn make_vector_between(p: &Point, q: &Point) -> Vector2 {
    Vector2::new(q.x - p.x, q.y - p.y)
}

/// A straight line segment limited by two end points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start point of the segment.
    pub start: Point,
    /// End point of the segment.
    pub end: Point,
}

impl Segment {
    /// Create a [`Segment`] between two points.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Vector going from `start` to `end`, with the segment's length.
    #[must_use]
    pub fn direction_vector(&self) -> Vector2 {
        make_vector_between(&self.start, &self.end)
    }

    /// Length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn point_distance() {
        let p = Point::new(0.0, 0.0);
        let q = Point::new(3.0, 4.0);
        assert_relative_eq!(p.distance_to(&q), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn point_displaced_scaled() {
        let p = Point::new(1.0, 2.0);
        let moved = p.displaced(Vector2::new(2.0, -1.0), 3.0);
        assert_eq!(moved, Point::new(7.0, -1.0));
    }

    #[test]
    fn vector_with_length() {
        let v = Vector2::new(3.0, 4.0).with_length(10.0);
        assert_eq!(v, Vector2::new(6.0, 8.0));
    }

    #[test]
    fn vector_direction_angle() {
        let v = Vector2::new(2.0, 1.0);
        assert_relative_eq!(v.cosine(), 2.0 / 5.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(v.sine(), 1.0 / 5.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn segment_direction_and_length() {
        let segment = Segment::new(Point::new(1.0, 1.0), Point::new(3.0, 2.0));
        assert_eq!(segment.direction_vector(), Vector2::new(2.0, 1.0));
        assert_relative_eq!(segment.length(), 5.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn points_equal_within_tolerance() {
        let p = Point::new(1.0, 2.0);
        assert_eq!(p, Point::new(1.0 + 1e-11, 2.0 - 1e-11));
        assert_ne!(p, Point::new(1.0 + 1e-9, 2.0));
    }
}
