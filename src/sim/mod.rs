//! Deterministic simulation module
//!
//! All physics lives here. This module must stay pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by particle id)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod field;
pub mod particle;
pub mod state;
pub mod tick;

pub use clock::TickClock;
pub use collision::{Contact, contact, deflect_off, elastic_exchange, resolve_elastic};
pub use field::{FieldPolicy, GravityField, PointSourceField, UniformField};
pub use particle::{EdgeHit, EdgePolicy, Particle, ParticleId};
pub use state::{MAX_EVENTS, ParticleView, SimEvent, SimState, Snapshot};
pub use tick::tick;
