//! Fixed timestep simulation tick
//!
//! One tick runs four phases over the whole collection, in id order:
//! pairwise collisions, position advance, obstacle deflection, then the
//! velocity update. Gravity applied this tick moves particles on the next.
//!
//! Pair resolution mutates as it goes, so resolving `(a, b)` before `(a, c)`
//! can change the outcome of `(a, c)` within the same tick. The order is
//! fixed by id, which keeps every run reproducible.

use super::collision::{deflect_off, pair_mut, resolve_elastic};
use super::field::GravityField;
use super::particle::{EdgeHit, Particle};
use super::state::{SimEvent, SimState};

/// Advance the simulation by one fixed step
pub fn tick(state: &mut SimState) {
    let before = state.particles.clone();
    let plane = state.settings.plane;
    let friction = state.settings.friction;
    let max_velocity = state.settings.max_velocity;
    let mut events = Vec::new();

    // Collisions
    let n = state.particles.len();
    for i in 0..n {
        for j in 0..n {
            if i == j || !state.particles[i].collisions || !state.particles[j].collisions {
                continue;
            }
            let (a, b) = pair_mut(&mut state.particles, i, j);
            if resolve_elastic(a, b) {
                events.push(SimEvent::Collision { a: a.id, b: b.id });
                for p in [a, b] {
                    let hit = p.advance(&plane, friction);
                    record_edge(&mut events, p, hit);
                }
            }
        }
    }

    // Position advance
    for p in &mut state.particles {
        let hit = p.advance(&plane, friction);
        record_edge(&mut events, p, hit);
    }

    // Obstacles
    for p in &mut state.particles {
        for (index, obstacle) in state.obstacles.iter().enumerate() {
            if deflect_off(p, obstacle, friction) {
                events.push(SimEvent::Deflected {
                    id: p.id,
                    obstacle: index,
                });
            }
        }
    }

    // Velocity update
    let field = state.settings.field;
    for p in &mut state.particles {
        let gravity = field.gravity_at(p);
        p.accelerate(gravity, max_velocity);
    }

    hold_non_finite(&mut state.particles, &before, &mut events);

    state.time_ticks += 1;
    for event in events {
        state.push_event(event);
    }
}

fn record_edge(events: &mut Vec<SimEvent>, particle: &Particle, hit: Option<EdgeHit>) {
    match hit {
        Some(EdgeHit::Bounced) => events.push(SimEvent::WallBounce { id: particle.id }),
        Some(EdgeHit::Wrapped) => events.push(SimEvent::Wrapped { id: particle.id }),
        None => {}
    }
}

/// Restore any particle whose state left the finite range this tick.
///
/// Fatal in debug builds. Otherwise the particle sits out the tick.
fn hold_non_finite(particles: &mut [Particle], before: &[Particle], events: &mut Vec<SimEvent>) {
    for (p, prev) in particles.iter_mut().zip(before) {
        let finite = p.pos.is_finite() && p.vel.is_finite();
        debug_assert!(finite, "particle {} produced non-finite state", p.id.0);
        if !finite {
            log::warn!("Particle {} went non-finite, holding it for a tick", p.id.0);
            *p = prev.clone();
            events.push(SimEvent::Inert { id: p.id });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;
    use crate::settings::{Plane, Scenario, Settings};
    use crate::sim::field::UniformField;
    use crate::sim::particle::{EdgePolicy, ParticleId};
    use crate::vector::Vector;
    use proptest::prelude::*;

    fn empty_state(width: f64, height: f64) -> SimState {
        let mut state = SimState::new(Settings::directional(Plane::new(width, height).unwrap())).unwrap();
        state.set_field(UniformField::zero()).unwrap();
        state
    }

    #[test]
    fn test_tick_counts() {
        let mut state = SimState::default();
        state.tick();
        state.tick();
        assert_eq!(state.time_ticks(), 2);
    }

    #[test]
    fn test_gravity_applies_one_tick_late() {
        let mut state = SimState::default();
        let id = state
            .spawn_particle(500.0, 500.0, 5.0, EdgePolicy::Sustain, false, None)
            .unwrap();
        state.tick();
        let p = state.particle(id).unwrap();
        // Position unchanged, velocity now carries the pull
        assert_eq!(p.pos, Vector::new(500.0, 500.0));
        assert!((p.vel.y + 0.05).abs() < 1e-12);
        state.tick();
        let p = state.particle(id).unwrap();
        assert!((p.pos.y - 499.95).abs() < 1e-9);
    }

    #[test]
    fn test_head_on_pair_swaps_and_reports() {
        let mut state = empty_state(400.0, 400.0);
        let a = state
            .spawn_particle(100.0, 200.0, 10.0, EdgePolicy::Sustain, true, Some(Vector::new(2.0, 0.0)))
            .unwrap();
        let b = state
            .spawn_particle(118.0, 200.0, 10.0, EdgePolicy::Sustain, true, Some(Vector::new(-2.0, 0.0)))
            .unwrap();
        state.tick();
        let (pa, pb) = (state.particle(a).unwrap(), state.particle(b).unwrap());
        assert!((pa.vel.x + 2.0).abs() < 1e-9);
        assert!((pb.vel.x - 2.0).abs() < 1e-9);
        assert!(pb.pos.x - pa.pos.x >= 20.0 - 1e-9);
        let events = state.drain_events();
        assert!(events.contains(&SimEvent::Collision { a, b }));
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_collisions_off_lets_particles_overlap() {
        let mut state = empty_state(400.0, 400.0);
        let a = state
            .spawn_particle(100.0, 200.0, 10.0, EdgePolicy::Sustain, false, Some(Vector::new(2.0, 0.0)))
            .unwrap();
        state
            .spawn_particle(105.0, 200.0, 10.0, EdgePolicy::Sustain, true, None)
            .unwrap();
        state.tick();
        assert_eq!(state.particle(a).unwrap().pos, Vector::new(102.0, 200.0));
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_wall_bounce_event() {
        let mut state = empty_state(200.0, 100.0);
        let id = state
            .spawn_particle(190.0, 50.0, 5.0, EdgePolicy::Bounce, false, Some(Vector::new(10.0, 0.0)))
            .unwrap();
        state.tick();
        assert_eq!(state.drain_events(), vec![SimEvent::WallBounce { id }]);
        assert!((state.particle(id).unwrap().vel.x + 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_wrap_event() {
        let mut state = empty_state(200.0, 100.0);
        let id = state
            .spawn_particle(203.0, 50.0, 5.0, EdgePolicy::Wrap, false, Some(Vector::new(2.0, 0.0)))
            .unwrap();
        state.tick();
        assert_eq!(state.drain_events(), vec![SimEvent::Wrapped { id }]);
        assert!((state.particle(id).unwrap().pos.x + 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_obstacle_deflects_falling_particle() {
        let mut state = empty_state(400.0, 400.0);
        let ledge = state.add_obstacle(Polygon::rectangle(200.0, 100.0, 200.0, 20.0).unwrap());
        let id = state
            .spawn_particle(200.0, 117.0, 5.0, EdgePolicy::Sustain, false, Some(Vector::new(0.0, -3.0)))
            .unwrap();
        state.tick();
        let p = state.particle(id).unwrap();
        assert!((p.vel.y - 3.0).abs() < 1e-9);
        assert!(p.vel.x.abs() < 1e-9);
        assert_eq!(
            state.drain_events(),
            vec![SimEvent::Deflected { id, obstacle: ledge }]
        );
    }

    #[test]
    fn test_off_center_hit_does_not_sink_through_ledge() {
        let mut state = empty_state(400.0, 400.0);
        let ledge = state.add_obstacle(Polygon::rectangle(200.0, 100.0, 200.0, 20.0).unwrap());
        let id = state
            .spawn_particle(290.0, 108.0, 5.0, EdgePolicy::Sustain, false, Some(Vector::new(3.0, -1.0)))
            .unwrap();
        for _ in 0..5 {
            state.tick();
        }
        let p = state.particle(id).unwrap();
        assert!(p.vel.y > 0.0);
        assert!(p.pos.y > 107.0, "sank to y = {}", p.pos.y);
        assert_eq!(
            state.drain_events(),
            vec![SimEvent::Deflected { id, obstacle: ledge }]
        );
    }

    #[test]
    fn test_orbit_stays_near_radius() {
        let mut state = SimState::with_scenario(Scenario::Orbital);
        state.set_max_velocity(100.0).unwrap();
        let id = state.spawn_at(960.0 + 200.0, 525.0).unwrap();
        for _ in 0..500 {
            state.tick();
        }
        let p = state.particle(id).unwrap();
        let r = (p.pos - Vector::new(960.0, 525.0)).magnitude();
        assert!((r - 200.0).abs() < 20.0, "orbit drifted to r = {}", r);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = || {
            let mut state = SimState::default();
            state.spawn_scatter(40, 7).unwrap();
            for _ in 0..200 {
                state.tick();
            }
            state.snapshot()
        };
        assert_eq!(run(), run());
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn test_non_finite_particle_is_held() {
        let mut state = empty_state(200.0, 100.0);
        state.set_max_velocity(f64::MAX).unwrap();
        let id = state
            .spawn_particle(f64::MAX, 0.0, 1.0, EdgePolicy::Sustain, false, Some(Vector::new(f64::MAX, 0.0)))
            .unwrap();
        state.tick();
        assert_eq!(state.particle(id).unwrap().pos.x, f64::MAX);
        assert_eq!(state.drain_events(), vec![SimEvent::Inert { id }]);
    }

    fn policy() -> impl Strategy<Value = EdgePolicy> {
        prop_oneof![
            Just(EdgePolicy::Wrap),
            Just(EdgePolicy::Bound),
            Just(EdgePolicy::Bounce),
            Just(EdgePolicy::Sustain),
        ]
    }

    proptest! {
        #[test]
        fn prop_speed_never_exceeds_cap(
            seed in any::<u64>(),
            count in 1usize..30,
            gx in -2.0f64..2.0,
            gy in -2.0f64..2.0,
            cap in 0.5f64..20.0,
            friction in -1.0f64..=1.0,
            edge in policy(),
        ) {
            let mut state = SimState::new(Settings::directional(Plane::new(600.0, 400.0).unwrap())).unwrap();
            state.set_field(UniformField::new(Vector::new(gx, gy))).unwrap();
            state.set_max_velocity(cap).unwrap();
            state.set_friction(friction).unwrap();
            state.set_radius_for_all(6.0).unwrap();
            state.set_edge_policy_for_all(edge);
            state.spawn_scatter(count, seed).unwrap();
            for _ in 0..50 {
                state.tick();
                for p in state.particles() {
                    prop_assert!(p.speed() <= cap + 1e-9);
                }
            }
        }

        #[test]
        fn prop_bounce_scales_speed_by_friction(
            y in 20.0f64..80.0,
            vx in 1.0f64..8.0,
            vy in -8.0f64..8.0,
            friction in 0.0f64..=1.0,
        ) {
            let plane = Plane::new(200.0, 100.0).unwrap();
            // Guaranteed right-wall hit, never a floor or ceiling hit
            let vy = vy.clamp(-(y - 10.0), 90.0 - y);
            let mut p = Particle::new(
                ParticleId(1),
                Vector::new(195.0 - vx / 2.0, y),
                5.0,
                EdgePolicy::Bounce,
                false,
                Vector::new(vx, vy),
            ).unwrap();
            let before = p.speed();
            prop_assert_eq!(p.advance(&plane, friction), Some(EdgeHit::Bounced));
            prop_assert!((p.speed() - before * (1.0 - friction)).abs() < 1e-9);
            prop_assert!(p.vel.x <= 0.0);
        }

        #[test]
        fn prop_bound_is_idempotent(
            x in -500.0f64..700.0,
            y in -500.0f64..600.0,
            vx in -50.0f64..50.0,
            vy in -50.0f64..50.0,
        ) {
            let plane = Plane::new(200.0, 100.0).unwrap();
            let mut p = Particle::new(
                ParticleId(1),
                Vector::new(x, y),
                5.0,
                EdgePolicy::Bound,
                false,
                Vector::new(vx, vy),
            ).unwrap();
            p.advance(&plane, 0.0);
            let once = p.pos;
            p.vel = Vector::ZERO;
            p.advance(&plane, 0.0);
            prop_assert_eq!(p.pos, once);
        }

        #[test]
        fn prop_collision_conserves_momentum(
            ax in -3.0f64..3.0,
            ay in -3.0f64..3.0,
            bx in -3.0f64..3.0,
            by in -3.0f64..3.0,
            offset in 0.0f64..std::f64::consts::TAU,
            gap in 0.0f64..9.9,
        ) {
            let mut a = Particle::new(
                ParticleId(1),
                Vector::ZERO,
                5.0,
                EdgePolicy::Sustain,
                true,
                Vector::new(ax, ay),
            ).unwrap();
            let mut b = Particle::new(
                ParticleId(2),
                Vector::from_polar(gap + 0.05, offset),
                5.0,
                EdgePolicy::Sustain,
                true,
                Vector::new(bx, by),
            ).unwrap();
            let before = a.vel + b.vel;
            prop_assert!(resolve_elastic(&mut a, &mut b));
            let after = a.vel + b.vel;
            prop_assert!((before - after).magnitude() < 1e-9);
        }
    }
}
