//! Core utilities shared by every layer
//!
//! - log     - console logging macros (no-ops off the browser)
//! - random  - xorshift32 generator for body tilt

#[macro_use]
pub mod log;
pub mod random;
