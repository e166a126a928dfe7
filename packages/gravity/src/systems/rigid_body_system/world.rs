use crate::domain::config::SolverIterations;
use crate::rigid_body::{Body, Vec2};

use super::collision::aabb_overlap;
use super::solver::{self, SLOP};

/// Reference step the air drag coefficients are tuned for (60 Hz)
pub const BASE_DELTA_MS: f64 = 1000.0 / 60.0;
/// Gravity (0, 1) is scaled to px/ms²
pub const GRAVITY_SCALE: f64 = 0.001;
/// Speed clamp (px/ms); keeps tiny elements from tunneling through piles
pub const MAX_SPEED: f64 = 4.0;

/// The simulation world: dynamic debris plus static boundaries
pub struct PhysicsWorld {
    bodies: Vec<Body>,
    next_id: u32,
    gravity: Vec2,
    iterations: SolverIterations,
    steps: u64,
}

impl PhysicsWorld {
    pub fn new(iterations: SolverIterations, gravity: Vec2) -> Self {
        Self {
            bodies: Vec::new(),
            next_id: 1,
            gravity,
            iterations,
            steps: 0,
        }
    }

    /// Add a body and return its id
    pub fn add_body(&mut self, mut body: Body) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        body.id = id;
        self.bodies.push(body);
        id
    }

    pub fn add_bodies(&mut self, bodies: impl IntoIterator<Item = Body>) {
        for body in bodies {
            self.add_body(body);
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: u32) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn dynamic_count(&self) -> usize {
        self.bodies.iter().filter(|b| !b.is_static()).count()
    }

    pub fn static_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.is_static()).count()
    }

    pub fn iterations(&self) -> SolverIterations {
        self.iterations
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn step_count(&self) -> u64 {
        self.steps
    }

    /// Apply a force at a world point to body `id` for the next step.
    /// Returns false for unknown or static bodies.
    pub fn apply_force(&mut self, id: u32, point: Vec2, force: Vec2) -> bool {
        match self.bodies.iter_mut().find(|b| b.id == id) {
            Some(body) if !body.is_static() => {
                body.apply_force(point, force);
                true
            }
            _ => false,
        }
    }

    /// Advance the world by `dt` milliseconds
    pub fn step(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }

        let accel = self.gravity * GRAVITY_SCALE;
        let drag_scale = dt / BASE_DELTA_MS;

        for body in self.bodies.iter_mut() {
            if body.is_static() {
                continue;
            }
            body.velocity += (accel + body.force * body.inv_mass) * dt;
            body.angular_vel += body.torque * body.inv_inertia * dt;

            let keep = (1.0 - body.material.friction_air * drag_scale).max(0.0);
            body.velocity = body.velocity * keep;
            body.angular_vel *= keep;

            let speed = body.velocity.length();
            if speed > MAX_SPEED {
                body.velocity = body.velocity * (MAX_SPEED / speed);
            }
            body.clear_forces();
        }

        let pairs = self.broad_phase();
        let mut constraints = solver::prepare(&self.bodies, &pairs);
        solver::solve_velocities(&mut self.bodies, &mut constraints, self.iterations.velocity);

        for body in self.bodies.iter_mut() {
            if body.is_static() {
                continue;
            }
            body.pos += body.velocity * dt;
            body.angle += body.angular_vel * dt;
        }

        solver::solve_positions(&mut self.bodies, &pairs, self.iterations.position);
        self.steps += 1;
    }

    /// All pairs (i < j) whose bounds overlap and that are not both static
    fn broad_phase(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let (a, b) = (&self.bodies[i], &self.bodies[j]);
                if a.is_static() && b.is_static() {
                    continue;
                }
                // Margin covers the distance a body can travel in one step
                if aabb_overlap(a, b, SLOP + MAX_SPEED * BASE_DELTA_MS) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rigid_body::Material;

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(SolverIterations::default(), Vec2::new(0.0, 1.0))
    }

    #[test]
    fn free_body_falls_straight_down() {
        let mut w = world();
        let id = w.add_body(Body::new_rect(250.0, 90.0, 300.0, 80.0, 8.0, Material::PAPER));
        w.step(BASE_DELTA_MS);

        let body = w.body(id).unwrap();
        assert_eq!(body.pos.x, 250.0);
        assert!(body.pos.y > 90.0);
        assert_eq!(body.angle, 0.0);
    }

    #[test]
    fn static_bodies_never_move() {
        let mut w = world();
        let id = w.add_body(Body::new_static(0.0, 0.0, 100.0, 100.0));
        for _ in 0..10 {
            w.step(BASE_DELTA_MS);
        }
        assert_eq!(w.body(id).unwrap().pos, Vec2::zero());
    }

    #[test]
    fn body_settles_on_floor() {
        let mut w = world();
        // Floor top edge at y = 500
        w.add_body(Body::new_static(200.0, 1000.0, 2000.0, 1000.0));
        let id = w.add_body(Body::new_rect(200.0, 300.0, 60.0, 20.0, 2.0, Material::PAPER));

        for _ in 0..600 {
            w.step(BASE_DELTA_MS);
        }

        let body = w.body(id).unwrap();
        assert!(body.pos.y < 500.0, "body sank through the floor: {}", body.pos.y);
        assert!(body.pos.y > 470.0, "body never landed: {}", body.pos.y);
        assert!(body.velocity.length() < 0.05);
    }

    #[test]
    fn apply_force_rejects_static_and_unknown_ids() {
        let mut w = world();
        let wall = w.add_body(Body::new_static(0.0, 0.0, 10.0, 10.0));
        assert!(!w.apply_force(wall, Vec2::zero(), Vec2::new(1.0, 0.0)));
        assert!(!w.apply_force(999, Vec2::zero(), Vec2::new(1.0, 0.0)));
    }
}
