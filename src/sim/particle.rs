//! Particles and edge policies
//!
//! A particle is plain data: position, velocity, radius and the two
//! per-particle switches. Display adapters read its position and
//! [`Particle::color`] each frame; nothing here knows about rendering.

use serde::{Deserialize, Serialize};

use crate::color::{Color, speed_color};
use crate::consts::WRAP_MARGIN;
use crate::error::{ConfigError, finite_point, positive};
use crate::geometry::HitRegion;
use crate::settings::Plane;
use crate::vector::Vector;

/// How a particle behaves at the plane boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EdgePolicy {
    /// Leave one edge, reappear at the opposite one
    Wrap,
    /// Hard stop at the wall, velocity unchanged
    Bound,
    /// Reflect off the wall, losing `friction` of the speed
    #[default]
    Bounce,
    /// No boundary interaction (orbits keep the body in view)
    Sustain,
}

impl EdgePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgePolicy::Wrap => "Wrap",
            EdgePolicy::Bound => "Bound",
            EdgePolicy::Bounce => "Bounce",
            EdgePolicy::Sustain => "Sustain",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "wrap" => Some(EdgePolicy::Wrap),
            "bound" => Some(EdgePolicy::Bound),
            "bounce" => Some(EdgePolicy::Bounce),
            "sustain" => Some(EdgePolicy::Sustain),
            _ => None,
        }
    }
}

/// What happened at the boundary during a position advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeHit {
    Bounced,
    Wrapped,
}

/// Stable handle to a spawned particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticleId(pub u32);

/// A moving circular body
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    pub pos: Vector,
    pub vel: Vector,
    radius: f64,
    pub edge_policy: EdgePolicy,
    /// Whether this particle takes part in pairwise collisions
    pub collisions: bool,
}

impl Particle {
    pub fn new(
        id: ParticleId,
        pos: Vector,
        radius: f64,
        edge_policy: EdgePolicy,
        collisions: bool,
        vel: Vector,
    ) -> Result<Self, ConfigError> {
        finite_point(pos.x, pos.y)?;
        finite_point(vel.x, vel.y)?;
        let radius = positive(radius, ConfigError::InvalidRadius)?;
        Ok(Self {
            id,
            pos,
            vel,
            radius,
            edge_policy,
            collisions,
        })
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Replace the radius; only a positive, finite value is accepted
    pub fn set_radius(&mut self, radius: f64) -> Result<(), ConfigError> {
        self.radius = positive(radius, ConfigError::InvalidRadius)?;
        Ok(())
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.vel.magnitude()
    }

    /// Display color for the current speed under `max_velocity`
    pub fn color(&self, max_velocity: f64) -> Color {
        speed_color(self.speed(), max_velocity)
    }

    /// The particle's body as a circular hit region
    pub fn hit_region(&self) -> Option<HitRegion> {
        HitRegion::circle(self.pos.x, self.pos.y, self.radius).ok()
    }

    pub fn shift(&mut self, delta: Vector) {
        self.pos = self.pos + delta;
    }

    /// Move by the current velocity, then apply the edge policy
    pub fn advance(&mut self, plane: &Plane, friction: f64) -> Option<EdgeHit> {
        self.pos = self.pos + self.vel;
        match self.edge_policy {
            EdgePolicy::Bound => {
                self.pos = self.bounded(plane);
                None
            }
            EdgePolicy::Wrap => {
                let wrapped = Vector::new(
                    wrap(self.pos.x, plane.width),
                    wrap(self.pos.y, plane.height),
                );
                let hit = (wrapped != self.pos).then_some(EdgeHit::Wrapped);
                self.pos = wrapped;
                hit
            }
            EdgePolicy::Bounce => {
                let r = self.radius;
                let mut hit = false;
                if self.pos.x + r > plane.width || self.pos.x - r < 0.0 {
                    self.vel = self.vel.scale(1.0 - friction).negate_x();
                    hit = true;
                }
                if self.pos.y + r > plane.height || self.pos.y - r < 0.0 {
                    self.vel = self.vel.scale(1.0 - friction).negate_y();
                    hit = true;
                }
                if hit {
                    self.pos = self.bounded(plane);
                }
                hit.then_some(EdgeHit::Bounced)
            }
            EdgePolicy::Sustain => None,
        }
    }

    /// Velocity update: add the field contribution under the speed cap
    pub fn accelerate(&mut self, gravity: Vector, max_velocity: f64) {
        self.vel = self.vel.clamped_resultant(gravity, max_velocity);
    }

    fn bounded(&self, plane: &Plane) -> Vector {
        Vector::new(
            bound(self.pos.x, self.radius, plane.width),
            bound(self.pos.y, self.radius, plane.height),
        )
    }
}

/// Keep a center coordinate in `[radius, extent - radius]`.
///
/// When the plane is narrower than the particle the lower bound wins.
#[inline]
fn bound(v: f64, radius: f64, extent: f64) -> f64 {
    v.min(extent - radius).max(radius)
}

/// Teleport to the opposite edge once past the wrap margin
#[inline]
fn wrap(v: f64, extent: f64) -> f64 {
    if v > extent + WRAP_MARGIN {
        -WRAP_MARGIN
    } else if v < -WRAP_MARGIN {
        extent + WRAP_MARGIN
    } else {
        v
    }
}
