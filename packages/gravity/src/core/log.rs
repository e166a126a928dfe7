//! Console logging macros
//!
//! In the browser these forward to `console.log` / `console.warn`.
//! On native targets (unit tests, integration tests) the arguments are still
//! type-checked but nothing is printed: imported JS functions cannot be
//! called outside of wasm32.
//!
//! Usage:
//! ```rust
//! use folio_gravity::gravity_log;
//!
//! let bodies = 12;
//! gravity_log!("session started with {} bodies", bodies);
//! ```

/// Log an informational line to the browser console
#[macro_export]
macro_rules! gravity_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            let line = format!("[gravity] {}", format_args!($($arg)*));
            $crate::__web_sys::console::log_1(&line.into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Log a warning line to the browser console
#[macro_export]
macro_rules! gravity_warn {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            let line = format!("[gravity] {}", format_args!($($arg)*));
            $crate::__web_sys::console::warn_1(&line.into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}
