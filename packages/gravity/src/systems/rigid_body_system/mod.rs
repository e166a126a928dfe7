//! RigidBodySystem - Small impulse-based world for page debris
//!
//! This is intentionally simple: O(n²) broad phase, box-vs-box narrow phase,
//! sequential impulses for velocities and a split position pass for overlap.
//! Bodies never sleep; a session lasts seconds to minutes and holds tens to
//! low hundreds of bodies.
//!
//! Step order:
//! - integrate forces, gravity and air drag into velocities
//! - collide, then solve contact velocities (`velocity` iterations)
//! - integrate positions
//! - push remaining overlap apart (`position` iterations)

mod collision;
mod runner;
mod solver;
mod world;

pub use collision::{aabb_overlap, collide, Contact, Manifold};
pub use runner::Runner;
pub use world::{PhysicsWorld, BASE_DELTA_MS, GRAVITY_SCALE, MAX_SPEED};
