use std::f64::consts::PI;

use super::material::Material;
use super::vec2::Vec2;

/// Rotational inertia multiplier; keeps light debris from spinning up on
/// every glancing contact.
pub const INERTIA_SCALE: f64 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyKind {
    /// Simulated: affected by gravity, forces and contacts
    Dynamic,
    /// Never moves (floor, walls)
    Static,
}

/// Rigid Body - an oriented rectangle with chamfered corners
#[derive(Clone, Debug)]
pub struct Body {
    /// Assigned by the world on insertion
    pub id: u32,
    pub kind: BodyKind,

    // === Physics State ===
    /// World position of the center (page px)
    pub pos: Vec2,
    /// px per ms
    pub velocity: Vec2,
    /// Rotation angle (radians, clockwise on screen since y points down)
    pub angle: f64,
    /// rad per ms
    pub angular_vel: f64,

    // === Shape ===
    pub half_width: f64,
    pub half_height: f64,
    /// Corner rounding radius
    pub chamfer: f64,

    // === Mass ===
    pub mass: f64,
    pub inv_mass: f64,
    pub inertia: f64,
    pub inv_inertia: f64,

    pub material: Material,

    // === Accumulators (cleared every step) ===
    pub force: Vec2,
    pub torque: f64,

    /// Index of the page element this body drives, if any
    pub tag: Option<usize>,
}

impl Body {
    /// Create a dynamic rectangular body centered at (x, y)
    pub fn new_rect(x: f64, y: f64, w: f64, h: f64, chamfer: f64, material: Material) -> Self {
        let w = w.max(0.0);
        let h = h.max(0.0);
        let chamfer = chamfer.clamp(0.0, 0.5 * w.min(h));

        // Area of a rectangle with four quarter-circle corners cut in
        let area = (w * h - (4.0 - PI) * chamfer * chamfer).max(0.0);
        let mass = (material.density * area).max(f64::EPSILON);
        let inertia = (INERTIA_SCALE * mass * (w * w + h * h) / 12.0).max(f64::EPSILON);

        Self {
            id: 0,
            kind: BodyKind::Dynamic,
            pos: Vec2::new(x, y),
            velocity: Vec2::zero(),
            angle: 0.0,
            angular_vel: 0.0,
            half_width: w * 0.5,
            half_height: h * 0.5,
            chamfer,
            mass,
            inv_mass: 1.0 / mass,
            inertia,
            inv_inertia: 1.0 / inertia,
            material,
            force: Vec2::zero(),
            torque: 0.0,
            tag: None,
        }
    }

    /// Create a static rectangle (infinite mass, never integrated)
    pub fn new_static(x: f64, y: f64, w: f64, h: f64) -> Self {
        let mut body = Self::new_rect(x, y, w, h, 0.0, Material::BOUNDARY);
        body.kind = BodyKind::Static;
        body.mass = f64::INFINITY;
        body.inv_mass = 0.0;
        body.inertia = f64::INFINITY;
        body.inv_inertia = 0.0;
        body
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_tag(mut self, tag: usize) -> Self {
        self.tag = Some(tag);
        self
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.kind == BodyKind::Static
    }

    pub fn width(&self) -> f64 {
        self.half_width * 2.0
    }

    pub fn height(&self) -> f64 {
        self.half_height * 2.0
    }

    /// Local x and y axes in world space
    #[inline]
    pub fn axes(&self) -> [Vec2; 2] {
        let (sin, cos) = self.angle.sin_cos();
        [Vec2::new(cos, sin), Vec2::new(-sin, cos)]
    }

    /// Transform a local offset (relative to the center) into world space
    #[inline]
    pub fn local_to_world(&self, local: Vec2) -> Vec2 {
        self.pos + local.rotate(self.angle)
    }

    /// Axis-aligned bounds as (min, max)
    pub fn aabb(&self) -> (Vec2, Vec2) {
        let [ax, ay] = self.axes();
        let ex = (ax.x * self.half_width).abs() + (ay.x * self.half_height).abs();
        let ey = (ax.y * self.half_width).abs() + (ay.y * self.half_height).abs();
        (
            Vec2::new(self.pos.x - ex, self.pos.y - ey),
            Vec2::new(self.pos.x + ex, self.pos.y + ey),
        )
    }

    /// Accumulate a force applied at a world point for the next step.
    /// Static bodies ignore forces.
    pub fn apply_force(&mut self, point: Vec2, force: Vec2) {
        if self.is_static() {
            return;
        }
        self.force += force;
        self.torque += (point - self.pos).cross(force);
    }

    /// Apply an instantaneous impulse at a world point
    pub fn apply_impulse(&mut self, point: Vec2, impulse: Vec2) {
        if self.is_static() {
            return;
        }
        self.velocity += impulse * self.inv_mass;
        self.angular_vel += self.inv_inertia * (point - self.pos).cross(impulse);
    }

    /// Velocity of a world point attached to this body
    #[inline]
    pub fn point_velocity(&self, point: Vec2) -> Vec2 {
        self.velocity + Vec2::cross_scalar(self.angular_vel, point - self.pos)
    }

    pub(crate) fn clear_forces(&mut self) {
        self.force = Vec2::zero();
        self.torque = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mass_follows_density_and_chamfered_area() {
        let body = Body::new_rect(0.0, 0.0, 300.0, 80.0, 8.0, Material::PAPER);
        let area = 300.0 * 80.0 - (4.0 - PI) * 64.0;
        assert!((body.mass - 0.002 * area).abs() < 1e-9);
        assert!(!body.is_static());
    }

    #[test]
    fn static_bodies_ignore_forces() {
        let mut wall = Body::new_static(0.0, 0.0, 1000.0, 2000.0);
        wall.apply_force(Vec2::new(10.0, 0.0), Vec2::new(0.0, 5.0));
        assert_eq!(wall.force, Vec2::zero());
        assert_eq!(wall.inv_mass, 0.0);
    }

    #[test]
    fn off_center_force_produces_torque() {
        let mut body = Body::new_rect(0.0, 0.0, 10.0, 10.0, 0.0, Material::PAPER);
        body.apply_force(Vec2::new(5.0, 0.0), Vec2::new(0.0, 1.0));
        assert!(body.torque > 0.0);
    }

    #[test]
    fn aabb_grows_with_rotation() {
        let body = Body::new_rect(0.0, 0.0, 10.0, 2.0, 0.0, Material::PAPER)
            .with_angle(std::f64::consts::FRAC_PI_4);
        let (min, max) = body.aabb();
        assert!(max.y - min.y > 2.0);
        assert!(max.x - min.x < 10.0);
    }
}
