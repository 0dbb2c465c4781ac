//! Gravity Sandbox - particles in a configurable gravity field
//!
//! Core modules:
//! - `vector`: Immutable 2D vector with the velocity-cap law
//! - `geometry`: Points, segments and hit regions (polygon, arc, circle)
//! - `sim`: Fixed-tick simulation (particles, collisions, field policies)
//! - `settings`: Scenario presets and JSON configuration
//! - `color`: Speed-to-color ramp consumed by display adapters

pub mod color;
pub mod error;
pub mod geometry;
pub mod settings;
pub mod sim;
pub mod vector;

pub use color::Color;
pub use error::ConfigError;
pub use settings::{Scenario, Settings};
pub use sim::{SimState, Snapshot};
pub use vector::Vector;

use glam::DVec2;

/// Simulation configuration constants
pub mod consts {
    /// Ticks per second the external scheduler should aim for
    pub const TICK_RATE_HZ: f64 = 100.0;
    /// Fixed simulation period in seconds
    pub const SIM_DT: f64 = 1.0 / TICK_RATE_HZ;
    /// Maximum ticks run per clock advance to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default plane dimensions
    pub const PLANE_WIDTH: f64 = 1920.0;
    pub const PLANE_HEIGHT: f64 = 1050.0;

    /// Margin past the plane edge before a wrapping particle teleports
    pub const WRAP_MARGIN: f64 = 4.0;

    /// Particle defaults
    pub const PARTICLE_RADIUS: f64 = 15.0;

    /// Directional scenario: drag-line length (screen pixels) per unit of field
    pub const GRAVITY_SCALE: f64 = 1000.0;
    /// Directional scenario: default drag line (0, 50) in screen space
    pub const DEFAULT_DRAG: (f64, f64) = (0.0, 50.0);
    pub const DIRECTIONAL_MAX_VELOCITY: f64 = 12.5;

    /// Orbital scenario
    pub const GRAVITY_CONSTANT: f64 = 6.674;
    pub const ORBITAL_MAX_VELOCITY: f64 = 7.25;
    /// Radius of the drawn source body; bounds the default source mass
    pub const SOURCE_RADIUS: f64 = 50.0;

    /// Hue ramp: hue = HUE_SLOPE * (speed / max_velocity) + HUE_OFFSET
    pub const HUE_SLOPE: f64 = -300.0;
    pub const HUE_OFFSET: f64 = -60.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f64) -> f64 {
    use std::f64::consts::PI;
    if !angle.is_finite() {
        return angle;
    }
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: DVec2) -> (f64, f64) {
    (pos.length(), pos.y.atan2(pos.x))
}
