//! Browser surface: DOM adapter, timers and the JS-facing controller

pub mod dom;
pub(crate) mod schedule;
pub mod wasm;
