//! Boundary points owned by a hit region

use serde::{Deserialize, Serialize};

use crate::Vector;

/// A 2D position owned by a hit region.
///
/// Points move with their region: shifting the region's center shifts every
/// owned point by the same delta, so the region keeps its shape.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn shift(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        distance(self, other)
    }

    pub fn as_vector(&self) -> Vector {
        Vector::new(self.x, self.y)
    }
}

impl From<Vector> for Point {
    fn from(v: Vector) -> Self {
        Self::new(v.x, v.y)
    }
}

/// Euclidean distance between two points, from coordinate differences
#[inline]
pub fn distance(p0: &Point, p1: &Point) -> f64 {
    (p0.x - p1.x).hypot(p0.y - p1.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_uses_coordinate_differences() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(4.0, 5.0);
        assert!((distance(&a, &b) - 5.0).abs() < 1e-12);
        // A sum-of-coordinates metric would give sqrt(25 + 36)
        assert!((distance(&a, &b) - 61f64.sqrt()).abs() > 1.0);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = Point::new(-7.5, 3.25);
        assert_eq!(p.distance_to(&p), 0.0);
    }

    #[test]
    fn test_shift() {
        let mut p = Point::new(1.0, 2.0);
        p.shift(-3.0, 0.5);
        assert_eq!(p, Point::new(-2.0, 2.5));
    }
}
