//! Systems: the rigid-body runtime and the phases of a gravity session
//!
//! - rigid_body / rigid_body_system - bodies, world, solver, runner
//! - extraction  - pick and freeze page elements
//! - builder     - snapshots to bodies and boundaries
//! - render      - project body poses onto element transforms
//! - interaction - pointer-down repulsion
//! - restoration - animate back, then restore original styles

pub mod rigid_body;
pub mod rigid_body_system;

pub mod builder;
pub mod extraction;
pub mod interaction;
pub mod render;
pub mod restoration;
