//! Folio Gravity - the portfolio's "gravity explosion" effect in WASM
//!
//! On trigger, visible page elements are frozen at their absolute position,
//! handed to a 2D rigid-body world and dropped onto a floor at the bottom of
//! the document; pointer-down pushes them away. Reset animates everything
//! back and restores every touched `style` attribute exactly.
//!
//! Architecture:
//! - core/        - logging macros, rng
//! - domain/      - config, page capability, snapshots, style values
//! - systems/     - rigid bodies and world, extraction, builder,
//!                  interaction, rendering, restoration
//! - simulation/  - session and the orchestrator state machine
//! - api/         - DOM adapter, browser timers, JS controller

// Macros first so every later module can use them
#[macro_use]
pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;
pub mod api;

pub use systems::rigid_body;
pub use systems::rigid_body_system;

#[doc(hidden)]
pub use web_sys as __web_sys;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the module
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    gravity_log!("folio-gravity {} initialized", version());
}

/// Crate version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

pub use api::dom::DomPage;
pub use api::wasm::GravityController;
pub use domain::config::GravityConfig;
#[cfg(any(test, feature = "test-support"))]
pub use domain::memory_page::MemoryPage;
pub use domain::page::{Page, Rect};
pub use simulation::{GravityOrchestrator, GravitySession, Phase, SessionStats};
