//! Simulation session state
//!
//! A `SimState` owns one particle collection plus the live configuration.
//! Every mutation goes through `&mut self`, so spawns, resets and setter
//! calls can never interleave with an in-progress tick.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::field::FieldPolicy;
use super::particle::{EdgePolicy, Particle, ParticleId};
use crate::color::Color;
use crate::error::{ConfigError, finite_point, positive};
use crate::geometry::HitRegion;
use crate::settings::{Plane, Scenario, Settings, check_friction};
use crate::vector::Vector;

/// Maximum buffered events between drains
pub const MAX_EVENTS: usize = 4096;

/// Something the UI layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Two particles collided and were separated
    Collision { a: ParticleId, b: ParticleId },
    /// A particle reflected off the plane boundary
    WallBounce { id: ParticleId },
    /// A particle wrapped to the opposite edge
    Wrapped { id: ParticleId },
    /// A particle was deflected by an obstacle
    Deflected { id: ParticleId, obstacle: usize },
    /// A particle produced non-finite state and was held for a tick
    Inert { id: ParticleId },
}

/// Display-facing view of one particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub id: ParticleId,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub speed: f64,
    pub color: Color,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub particles: Vec<ParticleView>,
}

/// One independent simulation
#[derive(Debug, Clone)]
pub struct SimState {
    /// Live configuration
    pub(crate) settings: Settings,
    /// Configuration restored by `reset`
    defaults: Settings,
    /// Particles, sorted by id
    pub(crate) particles: Vec<Particle>,
    pub(crate) obstacles: Vec<HitRegion>,
    pub(crate) events: Vec<SimEvent>,
    /// Ticks run since the last reset
    pub(crate) time_ticks: u64,
    next_id: u32,
}

impl SimState {
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        log::info!(
            "{} scenario on a {}x{} plane",
            settings.scenario.as_str(),
            settings.plane.width,
            settings.plane.height
        );
        Ok(Self {
            defaults: settings.clone(),
            settings,
            particles: Vec::new(),
            obstacles: Vec::new(),
            events: Vec::new(),
            time_ticks: 0,
            next_id: 1,
        })
    }

    /// Default settings for a scenario on the default plane
    pub fn with_scenario(scenario: Scenario) -> Self {
        let settings = Settings::for_scenario(scenario, Plane::default());
        Self {
            defaults: settings.clone(),
            settings,
            particles: Vec::new(),
            obstacles: Vec::new(),
            events: Vec::new(),
            time_ticks: 0,
            next_id: 1,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn plane(&self) -> Plane {
        self.settings.plane
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles
            .binary_search_by_key(&id, |p| p.id)
            .ok()
            .map(|i| &self.particles[i])
    }

    pub fn particle_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles
            .binary_search_by_key(&id, |p| p.id)
            .ok()
            .map(move |i| &mut self.particles[i])
    }

    /// Display color of a particle under the current speed cap
    pub fn color_of(&self, id: ParticleId) -> Option<Color> {
        self.particle(id).map(|p| p.color(self.settings.max_velocity))
    }

    fn next_particle_id(&mut self) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        id
    }

    // === Spawning ===

    /// Spawn a particle with explicit parameters
    pub fn spawn_particle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        edge_policy: EdgePolicy,
        collisions: bool,
        initial_velocity: Option<Vector>,
    ) -> Result<ParticleId, ConfigError> {
        let pos = Vector::new(x, y);
        let vel = initial_velocity.unwrap_or(Vector::ZERO);
        // Validate before consuming an id
        let mut particle = Particle::new(ParticleId(0), pos, radius, edge_policy, collisions, vel)?;
        let id = self.next_particle_id();
        particle.id = id;
        self.particles.push(particle);
        log::debug!("Spawned particle {} at ({:.1}, {:.1})", id.0, x, y);
        Ok(id)
    }

    /// Spawn at `(x, y)` with the current settings.
    ///
    /// Under a point-source field the particle is seeded onto a circular orbit.
    pub fn spawn_at(&mut self, x: f64, y: f64) -> Result<ParticleId, ConfigError> {
        finite_point(x, y)?;
        let velocity = self.settings.field.spawn_velocity(Vector::new(x, y));
        self.spawn_particle(
            x,
            y,
            self.settings.particle_radius,
            self.settings.edge_policy,
            self.settings.collisions,
            Some(velocity),
        )
    }

    /// Spawn `count` particles at seeded random positions inside the plane
    pub fn spawn_scatter(&mut self, count: usize, seed: u64) -> Result<Vec<ParticleId>, ConfigError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let plane = self.settings.plane;
        let r = self.settings.particle_radius.min(plane.width / 2.0).min(plane.height / 2.0);
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            let x = rng.random_range(r..=plane.width - r);
            let y = rng.random_range(r..=plane.height - r);
            ids.push(self.spawn_at(x, y)?);
        }
        log::info!("Scattered {} particles (seed {})", count, seed);
        Ok(ids)
    }

    // === Obstacles ===

    /// Place a fixed obstacle; returns its index
    pub fn add_obstacle(&mut self, region: impl Into<HitRegion>) -> usize {
        self.obstacles.push(region.into());
        self.obstacles.len() - 1
    }

    pub fn obstacles(&self) -> &[HitRegion] {
        &self.obstacles
    }

    pub fn clear_obstacles(&mut self) {
        self.obstacles.clear();
    }

    // === Configuration ===

    /// Replace the field policy; an invalid field leaves the current one in place
    pub fn set_field(&mut self, field: impl Into<FieldPolicy>) -> Result<(), ConfigError> {
        let field = field.into();
        field.validate()?;
        self.settings.field = field;
        log::info!("Field set to {:?}", self.settings.field);
        Ok(())
    }

    pub fn field(&self) -> &FieldPolicy {
        &self.settings.field
    }

    pub fn set_friction(&mut self, friction: f64) -> Result<(), ConfigError> {
        self.settings.friction = check_friction(friction)?;
        Ok(())
    }

    pub fn set_max_velocity(&mut self, max_velocity: f64) -> Result<(), ConfigError> {
        self.settings.max_velocity = positive(max_velocity, ConfigError::InvalidMaxVelocity)?;
        Ok(())
    }

    pub fn set_edge_policy_for_all(&mut self, policy: EdgePolicy) {
        self.settings.edge_policy = policy;
        for p in &mut self.particles {
            p.edge_policy = policy;
        }
    }

    pub fn set_collisions_enabled_for_all(&mut self, enabled: bool) {
        self.settings.collisions = enabled;
        for p in &mut self.particles {
            p.collisions = enabled;
        }
    }

    /// Resize every particle; rejected as a whole if the radius is invalid
    pub fn set_radius_for_all(&mut self, radius: f64) -> Result<(), ConfigError> {
        let radius = positive(radius, ConfigError::InvalidRadius)?;
        self.settings.particle_radius = radius;
        for p in &mut self.particles {
            p.set_radius(radius)?;
        }
        Ok(())
    }

    /// Update the plane size supplied by the display layer
    pub fn set_bounds(&mut self, width: f64, height: f64) -> Result<(), ConfigError> {
        self.settings.plane = Plane::new(width, height)?;
        Ok(())
    }

    /// Move the point source; returns false when the active field has no source
    pub fn move_source(&mut self, x: f64, y: f64) -> Result<bool, ConfigError> {
        match self.settings.field.as_point_source_mut() {
            Some(source) => source.move_to(x, y).map(|_| true),
            None => Ok(false),
        }
    }

    /// Change the point source mass; returns false when the active field has no source
    pub fn set_source_mass(&mut self, mass: f64) -> Result<bool, ConfigError> {
        match self.settings.field.as_point_source_mut() {
            Some(source) => source.set_mass(mass).map(|_| true),
            None => Ok(false),
        }
    }

    // === Lifecycle ===

    /// Clear every particle and restore the default configuration.
    ///
    /// The plane size is kept; it belongs to the display layer.
    pub fn reset(&mut self) {
        let plane = self.settings.plane;
        self.settings = self.defaults.clone();
        self.settings.plane = plane;
        self.particles.clear();
        self.events.clear();
        self.time_ticks = 0;
        log::info!("Reset {} scenario", self.settings.scenario.as_str());
    }

    /// Switch to another scenario's defaults and reset
    pub fn switch_scenario(&mut self, scenario: Scenario) {
        self.defaults = Settings::for_scenario(scenario, self.settings.plane);
        self.reset();
    }

    /// Advance by one fixed step
    pub fn tick(&mut self) {
        super::tick::tick(self);
    }

    // === Outputs ===

    pub(crate) fn push_event(&mut self, event: SimEvent) {
        if self.events.len() < MAX_EVENTS {
            self.events.push(event);
        }
    }

    /// Take every event recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        let max_velocity = self.settings.max_velocity;
        Snapshot {
            tick: self.time_ticks,
            particles: self
                .particles
                .iter()
                .map(|p| ParticleView {
                    id: p.id,
                    x: p.pos.x,
                    y: p.pos.y,
                    radius: p.radius(),
                    speed: p.speed(),
                    color: p.color(max_velocity),
                })
                .collect(),
        }
    }
}

impl Default for SimState {
    fn default() -> Self {
        Self::with_scenario(Scenario::Directional)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::field::{PointSourceField, UniformField};

    #[test]
    fn test_spawn_assigns_increasing_ids() {
        let mut state = SimState::default();
        let a = state.spawn_at(100.0, 100.0).unwrap();
        let b = state.spawn_at(200.0, 100.0).unwrap();
        assert!(a < b);
        assert_eq!(state.len(), 2);
        assert_eq!(state.particle(b).unwrap().pos, Vector::new(200.0, 100.0));
    }

    #[test]
    fn test_invalid_spawn_rejected_without_consuming_id() {
        let mut state = SimState::default();
        let err = state.spawn_particle(0.0, 0.0, 0.0, EdgePolicy::Bound, true, None);
        assert_eq!(err, Err(ConfigError::InvalidRadius(0.0)));
        assert!(state.spawn_at(f64::NAN, 1.0).is_err());
        assert!(state.is_empty());
        assert_eq!(state.spawn_at(10.0, 10.0).unwrap(), ParticleId(1));
    }

    #[test]
    fn test_orbital_spawn_is_seeded() {
        let mut state = SimState::with_scenario(Scenario::Orbital);
        let id = state.spawn_at(1060.0, 525.0).unwrap();
        let p = state.particle(id).unwrap();
        assert!(p.speed() > 0.0);
        assert!(p.vel.dot(Vector::new(1.0, 0.0)).abs() < 1e-9);
        assert_eq!(p.edge_policy, EdgePolicy::Sustain);
    }

    #[test]
    fn test_setters_apply_to_all() {
        let mut state = SimState::default();
        state.spawn_at(100.0, 100.0).unwrap();
        state.spawn_at(300.0, 100.0).unwrap();
        state.set_edge_policy_for_all(EdgePolicy::Wrap);
        state.set_collisions_enabled_for_all(false);
        state.set_radius_for_all(4.0).unwrap();
        for p in state.particles() {
            assert_eq!(p.edge_policy, EdgePolicy::Wrap);
            assert!(!p.collisions);
            assert_eq!(p.radius(), 4.0);
        }
        // New spawns pick up the same settings
        let id = state.spawn_at(500.0, 100.0).unwrap();
        assert_eq!(state.particle(id).unwrap().radius(), 4.0);
    }

    #[test]
    fn test_setters_reject_invalid_values() {
        let mut state = SimState::default();
        state.spawn_at(100.0, 100.0).unwrap();
        assert!(state.set_radius_for_all(0.0).is_err());
        assert_eq!(state.particles()[0].radius(), 15.0);
        assert!(state.set_max_velocity(-2.0).is_err());
        assert_eq!(state.settings().max_velocity, 12.5);
        assert!(state.set_friction(2.0).is_err());
        assert!(state.set_bounds(0.0, 100.0).is_err());
        assert!(state.set_friction(-1.0).is_ok());
    }

    #[test]
    fn test_reset_restores_defaults_and_keeps_plane() {
        let mut state = SimState::default();
        state.spawn_at(100.0, 100.0).unwrap();
        state.set_friction(0.3).unwrap();
        state.set_max_velocity(3.0).unwrap();
        state.set_field(UniformField::zero()).unwrap();
        state.set_bounds(800.0, 600.0).unwrap();
        state.tick();
        state.reset();
        assert!(state.is_empty());
        assert_eq!(state.time_ticks(), 0);
        assert_eq!(state.settings().friction, 0.0);
        assert_eq!(state.settings().max_velocity, 12.5);
        assert_ne!(*state.field(), FieldPolicy::Uniform(UniformField::zero()));
        assert_eq!(state.plane(), Plane::new(800.0, 600.0).unwrap());
    }

    #[test]
    fn test_set_field_rejects_invalid_fields() {
        let mut state = SimState::default();
        let before = *state.field();
        let nan = UniformField::new(Vector::new(f64::NAN, 0.0));
        assert!(matches!(state.set_field(nan), Err(ConfigError::InvalidPosition { .. })));
        let negative = PointSourceField {
            center: Vector::new(100.0, 100.0),
            gravity_constant: 6.674,
            mass: -1.0,
        };
        assert_eq!(state.set_field(negative), Err(ConfigError::InvalidSourceMass(-1.0)));
        assert_eq!(*state.field(), before);
        // The simulation still runs on the previous field
        state.spawn_at(100.0, 100.0).unwrap();
        state.tick();
        assert!(state.particles()[0].vel.is_finite());
    }

    #[test]
    fn test_switch_scenario() {
        let mut state = SimState::default();
        state.spawn_at(100.0, 100.0).unwrap();
        state.switch_scenario(Scenario::Orbital);
        assert!(state.is_empty());
        assert_eq!(state.settings().scenario, Scenario::Orbital);
        assert!(matches!(state.field(), FieldPolicy::PointSource(_)));
        state.reset();
        assert_eq!(state.settings().scenario, Scenario::Orbital);
    }

    #[test]
    fn test_move_source_only_for_point_fields() {
        let mut state = SimState::default();
        assert_eq!(state.move_source(10.0, 10.0), Ok(false));
        let source = PointSourceField::new(Vector::ZERO, 6.674, 100.0).unwrap();
        state.set_field(source).unwrap();
        assert_eq!(state.move_source(10.0, 10.0), Ok(true));
        assert_eq!(state.set_source_mass(5.0), Ok(true));
        match state.field() {
            FieldPolicy::PointSource(s) => {
                assert_eq!(s.center, Vector::new(10.0, 10.0));
                assert_eq!(s.mass, 5.0);
            }
            other => panic!("unexpected field {:?}", other),
        }
    }

    #[test]
    fn test_scatter_is_deterministic_and_in_bounds() {
        let mut a = SimState::default();
        let mut b = SimState::default();
        a.spawn_scatter(20, 42).unwrap();
        b.spawn_scatter(20, 42).unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
        let plane = a.plane();
        for p in a.particles() {
            assert!(p.pos.x >= p.radius() && p.pos.x <= plane.width - p.radius());
            assert!(p.pos.y >= p.radius() && p.pos.y <= plane.height - p.radius());
        }
    }

    #[test]
    fn test_snapshot_reports_color_and_speed() {
        let mut state = SimState::default();
        let id = state
            .spawn_particle(50.0, 50.0, 5.0, EdgePolicy::Sustain, false, Some(Vector::new(12.5, 0.0)))
            .unwrap();
        let snap = state.snapshot();
        assert_eq!(snap.particles.len(), 1);
        assert_eq!(snap.particles[0].id, id);
        assert_eq!(snap.particles[0].speed, 12.5);
        assert_eq!(snap.particles[0].color.to_rgb_u32(), 0xFF0000);
        assert_eq!(state.color_of(id), Some(snap.particles[0].color));
    }
}
