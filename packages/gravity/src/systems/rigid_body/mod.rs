//! RigidBody - A chamfered rectangle that moves as a unit
//!
//! Bodies live in page coordinates (CSS pixels, y down, scroll included).
//! Time is measured in milliseconds, so velocities are px/ms and forces are
//! mass * px/ms².

mod vec2;
mod body;
mod material;

pub use vec2::Vec2;
pub use body::{Body, BodyKind, INERTIA_SCALE};
pub use material::Material;
