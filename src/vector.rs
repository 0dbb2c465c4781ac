//! Immutable 2D vector value type
//!
//! Every operation returns a new `Vector`. The one non-obvious operation is
//! [`Vector::clamped_resultant`], the velocity-cap law used by gravity
//! integration: the sum is only rescaled when it would exceed the cap, so
//! the cap is a ceiling on speed, never a target.

use std::ops::{Add, Neg, Sub};

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A 2D vector in the simulation's Y-up frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build a vector from a magnitude and an `atan2`-convention angle
    pub fn from_polar(magnitude: f64, angle: f64) -> Self {
        crate::polar_to_cartesian(magnitude, angle).into()
    }

    #[inline]
    pub fn as_dvec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn magnitude(self) -> f64 {
        self.as_dvec2().length()
    }

    /// Angle of the vector, `atan2(y, x)`
    #[inline]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    #[inline]
    pub fn scale(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k)
    }

    /// Unit vector in the same direction; the zero vector normalizes to zero
    pub fn normalize(self) -> Self {
        self.as_dvec2().normalize_or_zero().into()
    }

    /// Rotate counter-clockwise by `theta` radians
    pub fn rotate(self, theta: f64) -> Self {
        DVec2::from_angle(theta).rotate(self.as_dvec2()).into()
    }

    pub fn negate_x(self) -> Self {
        Self::new(-self.x, self.y)
    }

    pub fn negate_y(self) -> Self {
        Self::new(self.x, -self.y)
    }

    #[inline]
    pub fn dot(self, other: Vector) -> f64 {
        self.as_dvec2().dot(other.as_dvec2())
    }

    /// `self + delta`, rescaled to exactly `cap` if the sum would exceed it
    pub fn clamped_resultant(self, delta: Vector, cap: f64) -> Self {
        let sum = self + delta;
        if sum.magnitude() > cap {
            sum.normalize().scale(cap)
        } else {
            sum
        }
    }

    /// Mirror the vector across a wall running at `wall_angle` radians
    pub fn reflect_off_wall(self, wall_angle: f64) -> Self {
        let (sin2, cos2) = (2.0 * wall_angle).sin_cos();
        Self::new(
            self.x * cos2 + self.y * sin2,
            self.x * sin2 - self.y * cos2,
        )
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<DVec2> for Vector {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector> for DVec2 {
    fn from(v: Vector) -> Self {
        v.as_dvec2()
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{:.3}, {:.3}>", self.x, self.y)
    }
}
