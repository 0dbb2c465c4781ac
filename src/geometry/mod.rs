//! Hit-region geometry
//!
//! Closed regions that can be asked two questions about another region:
//! which of its points are candidate contacts, and at what wall angle a
//! body touching it should be deflected.

pub mod arc;
pub mod point;
pub mod polygon;
pub mod segment;

use std::borrow::Cow;

pub use arc::Arc;
pub use point::{Point, distance};
pub use polygon::Polygon;
pub use segment::{Orientation, Segment, orientation};

/// A closed region: polygon, or arc (a circle is a full-sweep arc)
#[derive(Debug, Clone, PartialEq)]
pub enum HitRegion {
    Polygon(Polygon),
    Arc(Arc),
}

impl HitRegion {
    pub fn circle(x: f64, y: f64, radius: f64) -> Result<Self, crate::ConfigError> {
        Arc::circle(x, y, radius).map(HitRegion::Arc)
    }

    pub fn center(&self) -> Point {
        match self {
            HitRegion::Polygon(p) => p.center(),
            HitRegion::Arc(a) => a.center(),
        }
    }

    /// Move the region so its center lands on `(x, y)`
    pub fn set_center(&mut self, x: f64, y: f64) {
        match self {
            HitRegion::Polygon(p) => p.set_center(x, y),
            HitRegion::Arc(a) => a.set_center(x, y),
        }
    }

    /// Candidate contact points of `self` as seen from `other`.
    ///
    /// A polygon offers its whole boundary. An arc offers the single point on
    /// the arc facing `other`'s center, or its own center when that bearing
    /// misses the span.
    pub fn contact_points_from(&self, other: &HitRegion) -> Cow<'_, [Point]> {
        match self {
            HitRegion::Polygon(p) => Cow::Borrowed(p.points()),
            HitRegion::Arc(a) => Cow::Owned(vec![a.contact_point(&other.center())]),
        }
    }

    /// Deflection angle against `other`, or `None` when they do not touch
    pub fn deflection_against(&self, other: &HitRegion) -> Option<f64> {
        let contacts = other.contact_points_from(self);
        match self {
            HitRegion::Polygon(p) => p.deflection_for(&contacts),
            HitRegion::Arc(a) => a.deflection_for(&contacts),
        }
    }
}

impl From<Polygon> for HitRegion {
    fn from(p: Polygon) -> Self {
        HitRegion::Polygon(p)
    }
}

impl From<Arc> for HitRegion {
    fn from(a: Arc) -> Self {
        HitRegion::Arc(a)
    }
}
