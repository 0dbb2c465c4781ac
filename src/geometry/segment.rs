//! Polygon boundary edges
//!
//! A `Segment` borrows its two endpoints from the owning polygon's point
//! list; segments are derived on demand and never stored on their own.

use super::point::{Point, distance};

/// Turn direction of an ordered point triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Orientation of `(p0, p1, p2)` from the sign of the cross product.
///
/// Works for vertical and horizontal edges alike; there is no slope division.
pub fn orientation(p0: &Point, p1: &Point, p2: &Point) -> Orientation {
    let cross = (p1.x - p0.x) * (p2.y - p0.y) - (p1.y - p0.y) * (p2.x - p0.x);
    if cross > 0.0 {
        Orientation::CounterClockwise
    } else if cross < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// One edge of a polygon boundary
#[derive(Debug, Clone, Copy)]
pub struct Segment<'a> {
    pub p0: &'a Point,
    pub p1: &'a Point,
}

impl<'a> Segment<'a> {
    pub fn new(p0: &'a Point, p1: &'a Point) -> Self {
        Self { p0, p1 }
    }

    pub fn length(&self) -> f64 {
        distance(self.p0, self.p1)
    }

    /// Whether `p` lies inside the segment's bounding box
    fn bounds_contain(&self, p: &Point) -> bool {
        p.x <= self.p0.x.max(self.p1.x)
            && p.x >= self.p0.x.min(self.p1.x)
            && p.y <= self.p0.y.max(self.p1.y)
            && p.y >= self.p0.y.min(self.p1.y)
    }

    /// Whether `p` lies on the segment itself
    pub fn contains(&self, p: &Point) -> bool {
        orientation(self.p0, self.p1, p) == Orientation::Collinear && self.bounds_contain(p)
    }

    /// Whether `p` is on this edge or the edge crosses the ray from `p` toward +x.
    ///
    /// A point lying on the edge counts as having the edge to its right.
    pub fn is_right_of_point(&self, p: &Point) -> bool {
        self.contains(p) || self.crosses_ray(p)
    }

    /// Ray-cast step: does this edge cross the ray from `p` toward `(+∞, p.y)`?
    ///
    /// Uses a half-open rule on the edge's y-range so a ray passing exactly
    /// through a shared vertex is counted once. Points on the edge are not
    /// special-cased here.
    pub fn crosses_ray(&self, p: &Point) -> bool {
        let (lo, hi) = if self.p0.y <= self.p1.y {
            (self.p0, self.p1)
        } else {
            (self.p1, self.p0)
        };
        if !(lo.y <= p.y && p.y < hi.y) {
            return false;
        }
        // With the edge directed upward, the crossing lies to the right of p
        // exactly when p is on its left.
        orientation(lo, hi, p) == Orientation::CounterClockwise
    }

    /// Relative closeness score of `p` to this edge.
    ///
    /// Sum of distances to both endpoints over the edge length: 1.0 on the
    /// segment, growing with distance. Only meaningful for ranking edges; a
    /// zero-length edge scores infinity so it is never the nearest.
    pub fn distance_ratio(&self, p: &Point) -> f64 {
        let length = self.length();
        if length == 0.0 {
            return f64::INFINITY;
        }
        (distance(self.p0, p) + distance(p, self.p1)) / length
    }

    /// Direction of the edge, `atan2(dy, dx)` in the Y-up frame
    pub fn wall_angle(&self) -> f64 {
        (self.p1.y - self.p0.y).atan2(self.p1.x - self.p0.x)
    }
}
