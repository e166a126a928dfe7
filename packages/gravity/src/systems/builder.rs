//! Physics world builder: snapshots become debris, the page gets a floor and
//! two walls.

use crate::core::random::Rng;
use crate::domain::config::{BoundaryConfig, GravityConfig, MaterialConfig};
use crate::domain::snapshot::ElementSnapshot;
use crate::rigid_body::{Body, Material, Vec2};
use crate::rigid_body_system::PhysicsWorld;

impl From<&MaterialConfig> for Material {
    fn from(cfg: &MaterialConfig) -> Self {
        Material {
            restitution: cfg.restitution,
            friction: cfg.friction,
            friction_air: cfg.friction_air,
            density: cfg.density,
        }
    }
}

/// Floor, left wall, right wall
pub fn boundary_bodies(viewport_width: f64, page_height: f64, cfg: &BoundaryConfig) -> [Body; 3] {
    let t = cfg.thickness;
    let half_t = t / 2.0;
    let wall_height = page_height * cfg.wall_height_factor;

    [
        Body::new_static(viewport_width / 2.0, page_height + cfg.floor_offset, viewport_width, t),
        Body::new_static(-half_t, page_height / 2.0, t, wall_height),
        Body::new_static(viewport_width + half_t, page_height / 2.0, t, wall_height),
    ]
}

/// Debris body for the snapshot at `index`, centered on its frozen anchor
pub fn debris_body<N>(snapshot: &ElementSnapshot<N>, index: usize, config: &GravityConfig, rng: &mut Rng) -> Body {
    let anchor = &snapshot.anchor;
    let center = snapshot.anchor_center();
    let chamfer = anchor.width.min(anchor.height) * config.material.chamfer_ratio;

    Body::new_rect(
        center.x,
        center.y,
        anchor.width,
        anchor.height,
        chamfer,
        Material::from(&config.material),
    )
    .with_angle(rng.symmetric(config.max_tilt))
    .with_tag(index)
}

/// Assemble a world: boundaries first, then one body per snapshot.
pub fn build_world<N>(
    snapshots: &[ElementSnapshot<N>],
    viewport_width: f64,
    page_height: f64,
    config: &GravityConfig,
    rng: &mut Rng,
) -> PhysicsWorld {
    let mut world = PhysicsWorld::new(config.iterations, Vec2::new(config.gravity_x, config.gravity_y));
    world.add_bodies(boundary_bodies(viewport_width, page_height, &config.boundary));
    world.add_bodies(
        snapshots
            .iter()
            .enumerate()
            .map(|(i, s)| debris_body(s, i, config, rng)),
    );
    world
}
