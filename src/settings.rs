//! Simulation settings and scenario presets
//!
//! Settings are plain serde data so the runner (or any UI layer) can load
//! them from JSON. Every value is validated before a simulation accepts it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, positive};
use crate::sim::field::{FieldPolicy, PointSourceField, UniformField};
use crate::sim::particle::EdgePolicy;
use crate::vector::Vector;

/// The two control scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Scenario {
    /// Uniform directional pull, particles bounce around the plane
    #[default]
    Directional,
    /// Point-mass source, particles spawn into circular orbits
    Orbital,
}

impl Scenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Directional => "Directional",
            Scenario::Orbital => "Orbital",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "directional" | "direction" => Some(Scenario::Directional),
            "orbital" | "source" | "orbit" => Some(Scenario::Orbital),
            _ => None,
        }
    }
}

/// Size of the simulation plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub width: f64,
    pub height: f64,
}

impl Plane {
    pub fn new(width: f64, height: f64) -> Result<Self, ConfigError> {
        let plane = Self { width, height };
        plane.validate()?;
        Ok(plane)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(ConfigError::InvalidBounds {
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn center(&self) -> Vector {
        Vector::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            width: PLANE_WIDTH,
            height: PLANE_HEIGHT,
        }
    }
}

/// Per-run simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub scenario: Scenario,
    pub plane: Plane,
    pub field: FieldPolicy,

    // === Particles ===
    /// Speed cap applied by every velocity update
    pub max_velocity: f64,
    /// Fraction of speed lost per wall bounce (negative gains energy)
    pub friction: f64,
    /// Radius given to newly spawned particles
    pub particle_radius: f64,
    pub edge_policy: EdgePolicy,
    pub collisions: bool,

    // === Scheduling ===
    /// Tick rate the external scheduler should run at
    #[serde(default = "default_tick_rate")]
    pub tick_rate_hz: f64,
}

fn default_tick_rate() -> f64 {
    TICK_RATE_HZ
}

impl Default for Settings {
    fn default() -> Self {
        Self::directional(Plane::default())
    }
}

impl Settings {
    /// Uniform downward pull, bouncing particles
    pub fn directional(plane: Plane) -> Self {
        let (dx, dy) = DEFAULT_DRAG;
        Self {
            scenario: Scenario::Directional,
            plane,
            field: UniformField::from_drag(dx, dy, GRAVITY_SCALE).into(),
            max_velocity: DIRECTIONAL_MAX_VELOCITY,
            friction: 0.0,
            particle_radius: PARTICLE_RADIUS,
            edge_policy: EdgePolicy::Bounce,
            collisions: true,
            tick_rate_hz: TICK_RATE_HZ,
        }
    }

    /// Point source at the plane center, particles left free to orbit
    pub fn orbital(plane: Plane) -> Self {
        let field = PointSourceField {
            center: plane.center(),
            gravity_constant: GRAVITY_CONSTANT,
            mass: default_source_mass(),
        };
        Self {
            scenario: Scenario::Orbital,
            plane,
            field: field.into(),
            max_velocity: ORBITAL_MAX_VELOCITY,
            friction: 0.0,
            particle_radius: PARTICLE_RADIUS,
            edge_policy: EdgePolicy::Sustain,
            collisions: true,
            tick_rate_hz: TICK_RATE_HZ,
        }
    }

    /// Defaults for a scenario on the given plane
    pub fn for_scenario(scenario: Scenario, plane: Plane) -> Self {
        match scenario {
            Scenario::Directional => Self::directional(plane),
            Scenario::Orbital => Self::orbital(plane),
        }
    }

    /// Reject any value the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.plane.validate()?;
        positive(self.max_velocity, ConfigError::InvalidMaxVelocity)?;
        positive(self.particle_radius, ConfigError::InvalidRadius)?;
        check_friction(self.friction)?;
        positive(self.tick_rate_hz, ConfigError::InvalidTickRate)?;
        self.field.validate()
    }

    /// Fixed tick period in seconds
    pub fn tick_period(&self) -> f64 {
        1.0 / self.tick_rate_hz
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

/// Source mass that lets a body skimming the source stay under the speed cap
pub fn default_source_mass() -> f64 {
    ORBITAL_MAX_VELOCITY.powi(2) * SOURCE_RADIUS / GRAVITY_CONSTANT / 2.0
}

pub(crate) fn check_friction(friction: f64) -> Result<f64, ConfigError> {
    if friction.is_finite() && (-1.0..=1.0).contains(&friction) {
        Ok(friction)
    } else {
        Err(ConfigError::InvalidFriction(friction))
    }
}
