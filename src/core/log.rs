//! Console logging
//!
//! On wasm32 messages go to the browser console through `web_sys`.
//! Native builds (tests, tooling) compile the calls away so nothing
//! reaches for a JS import outside the browser.

/// Log a formatted line to the browser console.
///
/// ```rust
/// use sandbox_state::console_log;
///
/// let name = "demo";
/// console_log!("opened project {}", name);
/// ```
#[macro_export]
macro_rules! console_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            $crate::core::log::write(&format!($($arg)*));
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Log a formatted warning to the browser console.
#[macro_export]
macro_rules! console_warn {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            $crate::core::log::warn(&format!($($arg)*));
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

#[cfg(target_arch = "wasm32")]
#[doc(hidden)]
pub fn write(message: &str) {
    web_sys::console::log_1(&message.into());
}

#[cfg(target_arch = "wasm32")]
#[doc(hidden)]
pub fn warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}
