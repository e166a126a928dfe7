//! Domain types: configuration, the page capability and captured snapshots

pub mod config;
#[cfg(any(test, feature = "test-support"))]
pub mod memory_page;
pub mod page;
pub mod snapshot;
pub mod styles;
