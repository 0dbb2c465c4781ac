//! Gravity field policies
//!
//! A field maps a particle to the acceleration acting on it for one tick.
//! Two policies exist: a uniform pull that ignores the particle entirely,
//! and a point source obeying the inverse-square law.

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use super::particle::Particle;
use crate::error::{ConfigError, finite_point};
use crate::vector::Vector;

/// Anything that can report the gravity acting on a particle
pub trait GravityField {
    fn gravity_at(&self, particle: &Particle) -> Vector;
}

/// The same pull everywhere
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UniformField {
    pub vector: Vector,
}

impl UniformField {
    pub fn new(vector: Vector) -> Self {
        Self { vector }
    }

    pub fn zero() -> Self {
        Self::new(Vector::ZERO)
    }

    /// Field from a screen-space drag (Y down), `scale` pixels per unit
    pub fn from_drag(dx: f64, dy: f64, scale: f64) -> Self {
        Self::new(Vector::new(dx, -dy).scale(1.0 / scale))
    }
}

impl GravityField for UniformField {
    fn gravity_at(&self, _particle: &Particle) -> Vector {
        self.vector
    }
}

/// A movable point mass: `g = G * M / r²` toward the source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointSourceField {
    pub center: Vector,
    pub gravity_constant: f64,
    pub mass: f64,
}

impl PointSourceField {
    pub fn new(center: Vector, gravity_constant: f64, mass: f64) -> Result<Self, ConfigError> {
        finite_point(center.x, center.y)?;
        check_mass(mass)?;
        if !gravity_constant.is_finite() {
            return Err(ConfigError::InvalidGravityConstant(gravity_constant));
        }
        Ok(Self {
            center,
            gravity_constant,
            mass,
        })
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> Result<(), ConfigError> {
        finite_point(x, y)?;
        self.center = Vector::new(x, y);
        Ok(())
    }

    pub fn set_mass(&mut self, mass: f64) -> Result<(), ConfigError> {
        self.mass = check_mass(mass)?;
        Ok(())
    }

    /// Acceleration at `pos`; zero at the source itself
    pub fn acceleration_at(&self, pos: Vector) -> Vector {
        let direction = self.center - pos;
        let r2 = direction.dot(direction);
        if r2 == 0.0 {
            return Vector::ZERO;
        }
        direction
            .normalize()
            .scale(self.gravity_constant * self.mass / r2)
    }

    /// Speed of a circular orbit at `pos`: `sqrt(G * M / r)`
    pub fn orbital_velocity(&self, pos: Vector) -> f64 {
        let r = (pos - self.center).magnitude();
        if r == 0.0 {
            return 0.0;
        }
        (self.gravity_constant * self.mass / r).sqrt()
    }

    /// Spawn-time velocity for a clockwise circular orbit at `pos`
    pub fn orbit_seed(&self, pos: Vector) -> Vector {
        self.acceleration_at(pos)
            .rotate(FRAC_PI_2)
            .normalize()
            .scale(self.orbital_velocity(pos))
    }
}

impl GravityField for PointSourceField {
    fn gravity_at(&self, particle: &Particle) -> Vector {
        self.acceleration_at(particle.pos)
    }
}

fn check_mass(mass: f64) -> Result<f64, ConfigError> {
    if mass.is_finite() && mass >= 0.0 {
        Ok(mass)
    } else {
        Err(ConfigError::InvalidSourceMass(mass))
    }
}

/// The active field policy of a simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FieldPolicy {
    Uniform(UniformField),
    PointSource(PointSourceField),
}

impl FieldPolicy {
    pub fn as_point_source_mut(&mut self) -> Option<&mut PointSourceField> {
        match self {
            FieldPolicy::PointSource(source) => Some(source),
            FieldPolicy::Uniform(_) => None,
        }
    }

    /// Reject a field the integrator cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            FieldPolicy::Uniform(field) => finite_point(field.vector.x, field.vector.y),
            FieldPolicy::PointSource(source) => {
                PointSourceField::new(source.center, source.gravity_constant, source.mass)
                    .map(|_| ())
            }
        }
    }

    /// Initial velocity for a particle spawned at `pos` under this field
    pub fn spawn_velocity(&self, pos: Vector) -> Vector {
        match self {
            FieldPolicy::Uniform(_) => Vector::ZERO,
            FieldPolicy::PointSource(source) => source.orbit_seed(pos),
        }
    }
}

impl Default for FieldPolicy {
    fn default() -> Self {
        FieldPolicy::Uniform(UniformField::zero())
    }
}

impl GravityField for FieldPolicy {
    fn gravity_at(&self, particle: &Particle) -> Vector {
        match self {
            FieldPolicy::Uniform(field) => field.gravity_at(particle),
            FieldPolicy::PointSource(field) => field.gravity_at(particle),
        }
    }
}

impl From<UniformField> for FieldPolicy {
    fn from(field: UniformField) -> Self {
        FieldPolicy::Uniform(field)
    }
}

impl From<PointSourceField> for FieldPolicy {
    fn from(field: PointSourceField) -> Self {
        FieldPolicy::PointSource(field)
    }
}
