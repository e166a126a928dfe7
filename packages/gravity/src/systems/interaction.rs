//! Pointer-down repulsion
//!
//! `Inactive` until armed (shortly after trigger, so the click that started
//! the session is not also an impulse), `Listening` until reset.

use crate::domain::config::ImpulseConfig;
use crate::rigid_body::Vec2;
use crate::rigid_body_system::PhysicsWorld;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionState {
    Inactive,
    Listening,
}

/// Linear falloff: `strength` at distance 0, zero at and beyond `radius`
pub fn force_magnitude(distance: f64, cfg: &ImpulseConfig) -> f64 {
    if distance < cfg.radius {
        cfg.strength * (1.0 - distance / cfg.radius)
    } else {
        0.0
    }
}

/// Force pushing a body centered at `center` away from `pointer`
pub fn repulsion(pointer: Vec2, center: Vec2, cfg: &ImpulseConfig) -> Option<Vec2> {
    let offset = center - pointer;
    let magnitude = force_magnitude(offset.length(), cfg);
    if magnitude <= 0.0 {
        return None;
    }
    let angle = offset.y.atan2(offset.x);
    Some(Vec2::from_angle(angle) * magnitude)
}

#[derive(Clone, Debug)]
pub struct InteractionHandler {
    state: InteractionState,
    config: ImpulseConfig,
}

impl InteractionHandler {
    pub fn new(config: ImpulseConfig) -> Self {
        Self {
            state: InteractionState::Inactive,
            config,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_listening(&self) -> bool {
        self.state == InteractionState::Listening
    }

    pub fn arm(&mut self) {
        self.state = InteractionState::Listening;
    }

    pub fn disarm(&mut self) {
        self.state = InteractionState::Inactive;
    }

    /// Apply repulsion around a pointer given in page coordinates.
    /// Returns the number of bodies pushed; zero when not listening.
    pub fn on_pointer_down(&self, world: &mut PhysicsWorld, pointer: Vec2) -> usize {
        if !self.is_listening() {
            return 0;
        }

        let pushes: Vec<(u32, Vec2, Vec2)> = world
            .bodies()
            .iter()
            .filter(|body| !body.is_static())
            .filter_map(|body| {
                repulsion(pointer, body.pos, &self.config).map(|force| (body.id, body.pos, force))
            })
            .collect();

        pushes
            .into_iter()
            .filter(|&(id, at, force)| world.apply_force(id, at, force))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::SolverIterations;
    use crate::rigid_body::{Body, Material};

    #[test]
    fn falloff_is_strictly_decreasing_inside_radius() {
        let cfg = ImpulseConfig::default();
        let mut last = f64::INFINITY;
        for d in [0.0, 1.0, 100.0, 250.0, 499.0] {
            let f = force_magnitude(d, &cfg);
            assert!(f < last, "{} at {}", f, d);
            last = f;
        }
        assert_eq!(force_magnitude(0.0, &cfg), 0.8);
    }

    #[test]
    fn hard_cutoff_at_radius() {
        let cfg = ImpulseConfig::default();
        assert_eq!(force_magnitude(500.0, &cfg), 0.0);
        assert_eq!(force_magnitude(10_000.0, &cfg), 0.0);
        assert!(repulsion(Vec2::zero(), Vec2::new(500.0, 0.0), &cfg).is_none());
    }

    #[test]
    fn force_points_away_from_pointer() {
        let cfg = ImpulseConfig::default();
        let f = repulsion(Vec2::new(100.0, 100.0), Vec2::new(100.0, 50.0), &cfg).unwrap();
        assert!(f.y < 0.0);
        assert!(f.x.abs() < 1e-12);
        assert!((f.length() - 0.8 * 0.9).abs() < 1e-12);
    }

    #[test]
    fn only_listening_handler_pushes_dynamic_bodies() {
        let mut world = PhysicsWorld::new(SolverIterations::default(), Vec2::new(0.0, 1.0));
        world.add_body(Body::new_static(0.0, 0.0, 100.0, 100.0));
        let near = world.add_body(Body::new_rect(100.0, 0.0, 20.0, 20.0, 2.0, Material::PAPER));
        world.add_body(Body::new_rect(900.0, 0.0, 20.0, 20.0, 2.0, Material::PAPER));

        let mut handler = InteractionHandler::new(ImpulseConfig::default());
        assert_eq!(handler.on_pointer_down(&mut world, Vec2::zero()), 0);

        handler.arm();
        assert_eq!(handler.on_pointer_down(&mut world, Vec2::zero()), 1);
        assert!(world.body(near).unwrap().force.x > 0.0);
        assert_eq!(world.bodies()[0].force, Vec2::zero());

        handler.disarm();
        assert_eq!(handler.state(), InteractionState::Inactive);
    }
}
