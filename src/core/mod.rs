//! Core building blocks: console logging, observable cells, editor defaults

// Macros first so the rest of the crate can use them
#[macro_use]
pub mod log;
pub mod settings;
pub mod store;
