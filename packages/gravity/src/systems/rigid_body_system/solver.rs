use crate::rigid_body::{Body, Material, Vec2};

use super::collision::collide;

/// Allowed overlap before position correction kicks in (px)
pub(super) const SLOP: f64 = 0.05;
/// Fraction of the remaining overlap removed per position iteration
const POSITION_DAMPEN: f64 = 0.8;
/// Approach speed below which contacts do not bounce (px/ms)
const RESTING_THRESHOLD: f64 = 0.12;

struct PointConstraint {
    ra: Vec2,
    rb: Vec2,
    normal_mass: f64,
    tangent_mass: f64,
    bounce: f64,
    normal_impulse: f64,
    tangent_impulse: f64,
}

pub(super) struct ContactConstraint {
    a: usize,
    b: usize,
    normal: Vec2,
    tangent: Vec2,
    friction: f64,
    points: Vec<PointConstraint>,
}

/// Borrow two distinct bodies mutably (`i < j`)
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert!(i < j);
    let (head, tail) = bodies.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

fn effective_mass(a: &Body, b: &Body, ra: Vec2, rb: Vec2, dir: Vec2) -> f64 {
    let rna = ra.cross(dir);
    let rnb = rb.cross(dir);
    let k = a.inv_mass + b.inv_mass + a.inv_inertia * rna * rna + b.inv_inertia * rnb * rnb;
    if k > 0.0 { 1.0 / k } else { 0.0 }
}

pub(super) fn prepare(bodies: &[Body], pairs: &[(usize, usize)]) -> Vec<ContactConstraint> {
    let mut constraints = Vec::new();

    for &(i, j) in pairs {
        let (a, b) = (&bodies[i], &bodies[j]);
        let Some(manifold) = collide(a, b) else {
            continue;
        };

        let normal = manifold.normal;
        let tangent = normal.perp();
        let restitution = Material::mix_restitution(&a.material, &b.material);

        let points = manifold
            .contacts
            .iter()
            .map(|c| {
                let ra = c.point - a.pos;
                let rb = c.point - b.pos;
                let approach = (b.point_velocity(c.point) - a.point_velocity(c.point)).dot(normal);
                PointConstraint {
                    ra,
                    rb,
                    normal_mass: effective_mass(a, b, ra, rb, normal),
                    tangent_mass: effective_mass(a, b, ra, rb, tangent),
                    bounce: if approach < -RESTING_THRESHOLD { -restitution * approach } else { 0.0 },
                    normal_impulse: 0.0,
                    tangent_impulse: 0.0,
                }
            })
            .collect();

        constraints.push(ContactConstraint {
            a: i,
            b: j,
            normal,
            tangent,
            friction: Material::mix_friction(&a.material, &b.material),
            points,
        });
    }

    constraints
}

pub(super) fn solve_velocities(bodies: &mut [Body], constraints: &mut [ContactConstraint], iterations: u32) {
    for _ in 0..iterations {
        for c in constraints.iter_mut() {
            let (a, b) = pair_mut(bodies, c.a, c.b);

            for p in c.points.iter_mut() {
                // Normal: non-penetration with restitution target
                let dv = b.velocity + Vec2::cross_scalar(b.angular_vel, p.rb)
                    - a.velocity
                    - Vec2::cross_scalar(a.angular_vel, p.ra);
                let vn = dv.dot(c.normal);
                let lambda = (p.bounce - vn) * p.normal_mass;
                let accumulated = (p.normal_impulse + lambda).max(0.0);
                let applied = accumulated - p.normal_impulse;
                p.normal_impulse = accumulated;
                apply_pair(a, b, p.ra, p.rb, c.normal * applied);

                // Tangent: Coulomb friction cone
                let dv = b.velocity + Vec2::cross_scalar(b.angular_vel, p.rb)
                    - a.velocity
                    - Vec2::cross_scalar(a.angular_vel, p.ra);
                let vt = dv.dot(c.tangent);
                let lambda = -vt * p.tangent_mass;
                let max_friction = (c.friction * p.normal_impulse).max(0.0);
                let accumulated = (p.tangent_impulse + lambda).clamp(-max_friction, max_friction);
                let applied = accumulated - p.tangent_impulse;
                p.tangent_impulse = accumulated;
                apply_pair(a, b, p.ra, p.rb, c.tangent * applied);
            }
        }
    }
}

#[inline]
fn apply_pair(a: &mut Body, b: &mut Body, ra: Vec2, rb: Vec2, impulse: Vec2) {
    a.velocity -= impulse * a.inv_mass;
    a.angular_vel -= a.inv_inertia * ra.cross(impulse);
    b.velocity += impulse * b.inv_mass;
    b.angular_vel += b.inv_inertia * rb.cross(impulse);
}

/// Push overlapping pairs apart, linearly, recomputing overlap every pass.
pub(super) fn solve_positions(bodies: &mut [Body], pairs: &[(usize, usize)], iterations: u32) {
    for _ in 0..iterations {
        let mut worst = 0.0f64;

        for &(i, j) in pairs {
            let (a, b) = pair_mut(bodies, i, j);
            let total_inv_mass = a.inv_mass + b.inv_mass;
            if total_inv_mass <= 0.0 {
                continue;
            }
            let Some(manifold) = collide(a, b) else {
                continue;
            };
            let depth = manifold.max_depth();
            if depth <= SLOP {
                continue;
            }
            worst = worst.max(depth);

            let correction = manifold.normal * ((depth - SLOP) * POSITION_DAMPEN / total_inv_mass);
            a.pos -= correction * a.inv_mass;
            b.pos += correction * b.inv_mass;
        }

        if worst <= SLOP {
            break;
        }
    }
}
