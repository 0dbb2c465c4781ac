//! Arc and circle hit regions
//!
//! An arc region is the sector of a disc around `center`, covering bearings
//! in `[start, start + sweep]` out to `radius`. A circle is the full sweep.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::point::{Point, distance};
use crate::error::{ConfigError, finite_point, positive};
use crate::{normalize_angle, polar_to_cartesian};

/// A disc sector in the Y-up frame
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    center: Point,
    radius: f64,
    /// Start bearing (radians, normalized to [-π, π))
    start: f64,
    /// Angular extent (radians, in (0, 2π])
    sweep: f64,
}

impl Arc {
    pub fn new(
        center_x: f64,
        center_y: f64,
        radius: f64,
        start: f64,
        sweep: f64,
    ) -> Result<Self, ConfigError> {
        finite_point(center_x, center_y)?;
        let radius = positive(radius, ConfigError::InvalidArcRadius)?;
        if !(sweep.is_finite() && sweep > 0.0 && sweep <= TAU) {
            return Err(ConfigError::InvalidSweep(sweep));
        }
        if !start.is_finite() {
            return Err(ConfigError::InvalidStartAngle(start));
        }
        Ok(Self {
            center: Point::new(center_x, center_y),
            radius,
            start: normalize_angle(start),
            sweep,
        })
    }

    /// A full circle: an arc whose sweep is 2π
    pub fn circle(center_x: f64, center_y: f64, radius: f64) -> Result<Self, ConfigError> {
        Self::new(center_x, center_y, radius, 0.0, TAU)
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn set_center(&mut self, x: f64, y: f64) {
        self.center = Point::new(x, y);
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    pub fn is_circle(&self) -> bool {
        self.sweep >= TAU
    }

    /// Rotate the arc's start bearing
    pub fn set_start(&mut self, start: f64) {
        self.start = normalize_angle(start);
    }

    /// Check if a bearing falls within `[start, start + sweep]`, handling wraparound
    pub fn contains_angle(&self, theta: f64) -> bool {
        if self.is_circle() {
            return true;
        }
        (theta - self.start).rem_euclid(TAU) <= self.sweep
    }

    /// Bearing from the arc's center to `p`
    pub fn bearing_to(&self, p: &Point) -> f64 {
        (p.y - self.center.y).atan2(p.x - self.center.x)
    }

    /// Angle of the direction from `p` back to the arc's center
    pub fn angle_to_center(&self, p: &Point) -> f64 {
        (self.center.y - p.y).atan2(self.center.x - p.x)
    }

    /// Whether `p` lies within the radius and inside the angular span
    pub fn under_arc(&self, p: &Point) -> bool {
        let d = distance(&self.center, p);
        d <= self.radius && (d == 0.0 || self.contains_angle(self.bearing_to(p)))
    }

    /// The point on the arc facing `toward`, or the center when the bearing misses the span
    pub fn contact_point(&self, toward: &Point) -> Point {
        let bearing = self.bearing_to(toward);
        if self.contains_angle(bearing) {
            let offset = polar_to_cartesian(self.radius, bearing);
            Point::new(self.center.x + offset.x, self.center.y + offset.y)
        } else {
            self.center
        }
    }

    /// Tangential deflection angle for the first contact point under the arc
    pub(crate) fn deflection_for(&self, contacts: &[Point]) -> Option<f64> {
        contacts
            .iter()
            .find(|p| self.under_arc(p))
            .map(|p| self.angle_to_center(p) + FRAC_PI_2)
    }
}
