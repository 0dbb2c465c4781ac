//! Configuration errors
//!
//! The simulation is a closed numeric system, so the only failures are
//! invalid parameters rejected at construction or setter time. Degenerate
//! geometry is never an error; it produces sentinel results instead.

use std::fmt;

/// Errors raised when a parameter is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Particle radius must be positive and finite.
    InvalidRadius(f64),
    /// Max velocity must be positive and finite.
    InvalidMaxVelocity(f64),
    /// Friction must lie in [-1, 1].
    InvalidFriction(f64),
    /// Plane dimensions must be positive and finite.
    InvalidBounds { width: f64, height: f64 },
    /// Positions and velocities must be finite.
    InvalidPosition { x: f64, y: f64 },
    /// A polygon needs at least 3 boundary points.
    TooFewPoints(usize),
    /// Arc radius must be positive and finite.
    InvalidArcRadius(f64),
    /// Arc sweep must lie in (0, 2π].
    InvalidSweep(f64),
    /// Arc start bearing must be finite.
    InvalidStartAngle(f64),
    /// Source mass must be non-negative and finite.
    InvalidSourceMass(f64),
    /// Gravity constant must be finite.
    InvalidGravityConstant(f64),
    /// Tick rate must be positive and finite.
    InvalidTickRate(f64),
    /// Tick period must be positive and finite.
    InvalidTickPeriod(f64),
    /// Settings could not be parsed.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidRadius(r) => {
                write!(f, "particle radius must be positive, got {}", r)
            }
            ConfigError::InvalidMaxVelocity(v) => {
                write!(f, "max velocity must be positive, got {}", v)
            }
            ConfigError::InvalidFriction(v) => {
                write!(f, "friction must be in [-1, 1], got {}", v)
            }
            ConfigError::InvalidBounds { width, height } => {
                write!(f, "plane must have positive size, got {}x{}", width, height)
            }
            ConfigError::InvalidPosition { x, y } => {
                write!(f, "coordinates must be finite, got ({}, {})", x, y)
            }
            ConfigError::TooFewPoints(n) => {
                write!(f, "polygon needs at least 3 points, got {}", n)
            }
            ConfigError::InvalidArcRadius(r) => {
                write!(f, "arc radius must be positive, got {}", r)
            }
            ConfigError::InvalidSweep(s) => write!(f, "arc sweep must be in (0, 2π], got {}", s),
            ConfigError::InvalidStartAngle(a) => {
                write!(f, "arc start angle must be finite, got {}", a)
            }
            ConfigError::InvalidSourceMass(m) => {
                write!(f, "source mass must be non-negative, got {}", m)
            }
            ConfigError::InvalidGravityConstant(g) => {
                write!(f, "gravity constant must be finite, got {}", g)
            }
            ConfigError::InvalidTickRate(hz) => {
                write!(f, "tick rate must be positive, got {}", hz)
            }
            ConfigError::InvalidTickPeriod(secs) => {
                write!(f, "tick period must be positive, got {}", secs)
            }
            ConfigError::Parse(msg) => write!(f, "invalid settings: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

/// Check a value is positive and finite, mapping failures through `err`.
pub(crate) fn positive(value: f64, err: fn(f64) -> ConfigError) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(err(value))
    }
}

pub(crate) fn finite_point(x: f64, y: f64) -> Result<(), ConfigError> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidPosition { x, y })
    }
}
