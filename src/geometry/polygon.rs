//! Polygonal hit regions

use super::point::Point;
use super::segment::Segment;
use crate::error::{ConfigError, finite_point};

/// A closed polygon: boundary points in order, last connecting back to first
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    center: Point,
    points: Vec<Point>,
}

impl Polygon {
    /// Build a polygon centered at `(center_x, center_y)` from points relative to that center
    pub fn new(center_x: f64, center_y: f64, relative: Vec<Point>) -> Result<Self, ConfigError> {
        if relative.len() < 3 {
            return Err(ConfigError::TooFewPoints(relative.len()));
        }
        finite_point(center_x, center_y)?;
        for p in &relative {
            finite_point(p.x, p.y)?;
        }
        let mut polygon = Self {
            center: Point::default(),
            points: relative,
        };
        polygon.set_center(center_x, center_y);
        Ok(polygon)
    }

    /// Axis-aligned rectangle centered on `(x, y)`
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Result<Self, ConfigError> {
        let (hw, hh) = (width / 2.0, height / 2.0);
        Self::new(
            x,
            y,
            vec![
                Point::new(-hw, -hh),
                Point::new(hw, -hh),
                Point::new(hw, hh),
                Point::new(-hw, hh),
            ],
        )
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Move the polygon so its center lands on `(x, y)`, keeping its shape
    pub fn set_center(&mut self, x: f64, y: f64) {
        let (dx, dy) = (x - self.center.x, y - self.center.y);
        self.center = Point::new(x, y);
        for p in &mut self.points {
            p.shift(dx, dy);
        }
    }

    /// Boundary points in absolute coordinates
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Boundary edges, one per point, closing the loop
    pub fn segments(&self) -> impl Iterator<Item = Segment<'_>> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| Segment::new(&self.points[i], &self.points[(i + 1) % n]))
    }

    /// Number of boundary edges the ray from `p` toward +x crosses
    pub fn crossing_count(&self, p: &Point) -> usize {
        self.segments().filter(|s| s.crosses_ray(p)).count()
    }

    /// Whether `p` lies on the boundary or inside it (odd crossing parity)
    pub fn contains(&self, p: &Point) -> bool {
        self.segments().any(|s| s.contains(p)) || self.crossing_count(p) % 2 == 1
    }

    /// The boundary edge with the smallest distance ratio to `p`
    pub fn nearest_segment(&self, p: &Point) -> Segment<'_> {
        self.segments()
            .min_by(|a, b| a.distance_ratio(p).total_cmp(&b.distance_ratio(p)))
            .unwrap_or_else(|| Segment::new(&self.points[0], &self.points[0]))
    }

    /// Wall angle of the nearest edge to the first contact point found inside
    pub(crate) fn deflection_for(&self, contacts: &[Point]) -> Option<f64> {
        contacts
            .iter()
            .find(|p| self.contains(p))
            .map(|p| self.nearest_segment(p).wall_angle())
    }
}
