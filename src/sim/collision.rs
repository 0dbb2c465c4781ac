//! Collision detection and response
//!
//! Particle pairs collide elastically with an implicit unit mass each.
//! Obstacles are arbitrary hit regions; a particle touching one is mirrored
//! across the region's deflection angle.

use std::f64::consts::FRAC_PI_2;

use super::particle::Particle;
use crate::geometry::HitRegion;
use crate::vector::Vector;

/// Geometry of an overlapping particle pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Angle of the line from the second center to the first
    pub angle: f64,
    /// Unit normal along that line
    pub normal: Vector,
    /// How far the bodies interpenetrate (sum of radii minus distance)
    pub overlap: f64,
}

/// Contact between `a` and `b` if their centers are within the sum of radii
pub fn contact(a: &Particle, b: &Particle) -> Option<Contact> {
    let d = a.pos - b.pos;
    let distance = d.magnitude();
    let reach = a.radius() + b.radius();
    if distance > reach {
        return None;
    }
    // Coincident centers have no contact line; separate along +x
    let normal = if distance == 0.0 {
        Vector::new(1.0, 0.0)
    } else {
        d.scale(1.0 / distance)
    };
    Some(Contact {
        angle: normal.angle(),
        normal,
        overlap: reach - distance,
    })
}

/// Equal-mass elastic exchange across a contact line at `contact_angle`.
///
/// Each velocity is split into its component along the contact line and the
/// tangent; the bodies swap the line components and keep their tangents.
pub fn elastic_exchange(v1: Vector, v2: Vector, contact_angle: f64) -> (Vector, Vector) {
    let (m1, t1) = (v1.magnitude(), v1.angle());
    let (m2, t2) = (v2.magnitude(), v2.angle());
    let along = Vector::from_polar(1.0, contact_angle);
    let across = Vector::from_polar(1.0, contact_angle + FRAC_PI_2);

    let v1f = along.scale(m2 * (t2 - contact_angle).cos())
        + across.scale(m1 * (t1 - contact_angle).sin());
    let v2f = along.scale(m1 * (t1 - contact_angle).cos())
        + across.scale(m2 * (t2 - contact_angle).sin());
    (v1f, v2f)
}

/// Separate an overlapping pair and exchange velocities.
///
/// Each body is pushed out by half the overlap along the contact line.
/// Velocities are only exchanged while the pair is closing, so a pair that
/// is already separating is not pulled back together. Returns whether the
/// pair was in contact.
pub fn resolve_elastic(a: &mut Particle, b: &mut Particle) -> bool {
    let Some(c) = contact(a, b) else {
        return false;
    };
    let push = c.normal.scale(c.overlap / 2.0);
    a.shift(push);
    b.shift(-push);

    let closing = (a.vel - b.vel).dot(c.normal) < 0.0;
    if closing {
        let (va, vb) = elastic_exchange(a.vel, b.vel, c.angle);
        a.vel = va;
        b.vel = vb;
    }
    true
}

/// Mirror a particle off an obstacle it is touching and moving into.
///
/// The reflected velocity is scaled by `1 - friction`, like a wall bounce.
pub fn deflect_off(particle: &mut Particle, obstacle: &HitRegion, friction: f64) -> bool {
    let Some(body) = particle.hit_region() else {
        return false;
    };
    let Some(wall_angle) = obstacle.deflection_against(&body) else {
        return false;
    };
    // Wall normal, turned to face the particle's side of the obstacle
    let normal = Vector::from_polar(1.0, wall_angle + FRAC_PI_2);
    let outward = particle.pos - obstacle.center().as_vector();
    let normal = if normal.dot(outward) < 0.0 { -normal } else { normal };
    if particle.vel.dot(normal) >= 0.0 {
        return false;
    }
    particle.vel = particle.vel.reflect_off_wall(wall_angle).scale(1.0 - friction);
    true
}

/// Mutable references to two distinct elements of a slice
pub fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    assert_ne!(i, j, "pair_mut needs distinct indices");
    if i < j {
        let (lo, hi) = items.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}
