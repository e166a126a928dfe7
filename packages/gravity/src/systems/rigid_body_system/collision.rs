//! Narrow phase for chamfered rectangles.
//!
//! Each body is treated as a "core" box (half extents minus the chamfer
//! radius) inflated by that radius. The core boxes are tested with the
//! separating axis theorem on the four face normals; the reference face is
//! the one with the greatest separation, and the incident edge of the other
//! box is clipped against the reference face's side planes. Corner contacts
//! are approximated by the face manifold, which is plenty for paper debris.

use crate::rigid_body::{Body, Vec2};

/// A single contact point
#[derive(Clone, Copy, Debug)]
pub struct Contact {
    /// World-space point halfway between the two surfaces
    pub point: Vec2,
    /// Overlap along the normal (positive = penetrating)
    pub depth: f64,
}

/// Up to two contacts sharing a normal
#[derive(Clone, Debug)]
pub struct Manifold {
    /// Unit normal pointing from body A to body B
    pub normal: Vec2,
    pub contacts: Vec<Contact>,
}

impl Manifold {
    pub fn max_depth(&self) -> f64 {
        self.contacts.iter().fold(f64::NEG_INFINITY, |m, c| m.max(c.depth))
    }
}

struct CoreBox {
    center: Vec2,
    axes: [Vec2; 2],
    half: [f64; 2],
}

impl CoreBox {
    fn of(body: &Body) -> Self {
        Self {
            center: body.pos,
            axes: body.axes(),
            half: [
                (body.half_width - body.chamfer).max(0.0),
                (body.half_height - body.chamfer).max(0.0),
            ],
        }
    }

    /// Half-length of the box's shadow on `n`
    fn projected_radius(&self, n: Vec2) -> f64 {
        self.half[0] * self.axes[0].dot(n).abs() + self.half[1] * self.axes[1].dot(n).abs()
    }
}

/// Best separating face of `reference` against `other`.
/// `d` points from the reference center to the other center.
/// Returns (separation, axis index, outward sign).
fn best_face(reference: &CoreBox, other: &CoreBox, d: Vec2) -> (f64, usize, f64) {
    let mut best = (f64::NEG_INFINITY, 0, 1.0);
    for k in 0..2 {
        let n = reference.axes[k];
        let dist = d.dot(n);
        let sep = dist.abs() - reference.half[k] - other.projected_radius(n);
        if sep > best.0 {
            let sign = if dist < 0.0 { -1.0 } else { 1.0 };
            best = (sep, k, sign);
        }
    }
    best
}

/// Keep the part of segment `v` where `n·p <= offset`
fn clip_segment(v: [Vec2; 2], n: Vec2, offset: f64) -> Option<[Vec2; 2]> {
    let d0 = n.dot(v[0]) - offset;
    let d1 = n.dot(v[1]) - offset;

    let mut out = [Vec2::zero(); 2];
    let mut count = 0;
    if d0 <= 0.0 {
        out[count] = v[0];
        count += 1;
    }
    if d1 <= 0.0 {
        out[count] = v[1];
        count += 1;
    }
    if d0 * d1 < 0.0 && count < 2 {
        let t = d0 / (d0 - d1);
        out[count] = v[0] + (v[1] - v[0]) * t;
        count += 1;
    }

    if count < 2 {
        None
    } else {
        Some(out)
    }
}

/// Compute the contact manifold between two bodies, if they touch.
pub fn collide(a: &Body, b: &Body) -> Option<Manifold> {
    let box_a = CoreBox::of(a);
    let box_b = CoreBox::of(b);
    let radius = a.chamfer + b.chamfer;
    let d = box_b.center - box_a.center;

    let face_a = best_face(&box_a, &box_b, d);
    let face_b = best_face(&box_b, &box_a, -d);
    if face_a.0 > radius || face_b.0 > radius {
        return None;
    }

    // Prefer A as reference unless B's face is clearly better; avoids
    // flip-flopping between nearly equal axes from frame to frame.
    let use_b = face_b.0 > 0.95 * face_a.0 + 0.01 * box_a.half[0].min(box_a.half[1]).max(1.0)
        && face_b.0 > face_a.0;
    let (reference, incident, (_, axis, sign)) = if use_b {
        (&box_b, &box_a, face_b)
    } else {
        (&box_a, &box_b, face_a)
    };

    let n_ref = reference.axes[axis] * sign;
    let face_center = reference.center + n_ref * reference.half[axis];
    let tangent = reference.axes[1 - axis];
    let face_extent = reference.half[1 - axis];

    // Incident edge: face of the other box most anti-parallel to n_ref
    let dots = [incident.axes[0].dot(n_ref), incident.axes[1].dot(n_ref)];
    let k = if dots[0].abs() >= dots[1].abs() { 0 } else { 1 };
    let inc_normal = incident.axes[k] * if dots[k] > 0.0 { -1.0 } else { 1.0 };
    let edge_center = incident.center + inc_normal * incident.half[k];
    let edge_dir = incident.axes[1 - k] * incident.half[1 - k];
    let edge = [edge_center + edge_dir, edge_center - edge_dir];

    let side = tangent.dot(face_center);
    let clipped = clip_segment(edge, tangent, side + face_extent)
        .and_then(|e| clip_segment(e, -tangent, -side + face_extent))?;

    let mut contacts = Vec::with_capacity(2);
    for p in clipped {
        let separation = n_ref.dot(p - face_center);
        if separation <= radius {
            contacts.push(Contact {
                point: p - n_ref * (separation * 0.5),
                depth: radius - separation,
            });
        }
    }

    if contacts.is_empty() {
        return None;
    }

    Some(Manifold {
        normal: if use_b { -n_ref } else { n_ref },
        contacts,
    })
}

/// Cheap AABB overlap test with a margin
pub fn aabb_overlap(a: &Body, b: &Body, margin: f64) -> bool {
    let (amin, amax) = a.aabb();
    let (bmin, bmax) = b.aabb();
    amin.x - margin <= bmax.x
        && bmin.x - margin <= amax.x
        && amin.y - margin <= bmax.y
        && bmin.y - margin <= amax.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rigid_body::Material;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Body {
        Body::new_rect(x, y, w, h, 0.0, Material::PAPER)
    }

    #[test]
    fn separated_boxes_do_not_collide() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(20.0, 0.0, 10.0, 10.0);
        assert!(collide(&a, &b).is_none());
    }

    #[test]
    fn resting_box_gets_two_contacts_with_upward_normal() {
        let floor = Body::new_static(0.0, 100.0, 400.0, 100.0);
        // Box bottom at 51, floor top at 50: one pixel of overlap
        let boxed = rect(0.0, 41.0, 20.0, 20.0);
        let m = collide(&floor, &boxed).expect("touching");
        assert_eq!(m.contacts.len(), 2);
        // Normal from floor (A) to box (B) points up the screen
        assert!(m.normal.y < -0.99);
        assert!((m.max_depth() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn normal_points_from_a_to_b_when_b_is_reference() {
        // A diamond resting on its corner: the floor's face is the better axis
        let diamond = rect(0.0, 0.0, 4.0, 4.0).with_angle(std::f64::consts::FRAC_PI_4);
        let floor = Body::new_static(0.0, 51.0, 400.0, 100.0);
        let m = collide(&diamond, &floor).expect("corner dips into the floor");
        assert!(m.normal.y > 0.99);
        assert_eq!(m.contacts.len(), 1);
        assert!((m.contacts[0].depth - (2.0 * std::f64::consts::SQRT_2 - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn chamfer_inflates_the_core_box() {
        let a = Body::new_rect(0.0, 0.0, 10.0, 10.0, 2.0, Material::PAPER);
        let b = Body::new_rect(9.5, 0.0, 10.0, 10.0, 2.0, Material::PAPER);
        let m = collide(&a, &b).expect("rounded edges overlap");
        assert!((m.max_depth() - 0.5).abs() < 1e-9);
        assert!(m.normal.x > 0.99);
    }
}
