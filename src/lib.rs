//! Sandbox State - project schema and reactive editor state in WASM
//!
//! Architecture:
//! - core/    - console logging, observable cells, defaults
//! - domain/  - project / body schema and the saved document format
//! - state/   - the editor's shared cells and the JS facade

// Logging macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod state;

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

    console_log!("sandbox-state {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get crate version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Format version written by `export_document`
#[wasm_bindgen]
pub fn document_format_version() -> u32 {
    crate::core::settings::DOCUMENT_FORMAT_VERSION
}

/// Arity of a geometry kind's argument tuple (0 for unknown names)
#[wasm_bindgen]
pub fn geometry_arity(geometry_type: &str) -> usize {
    domain::geometry::GeometryKind::from_name(geometry_type)
        .map(|k| k.arity())
        .unwrap_or(0)
}

// Re-export main types
pub use crate::core::store::{Subscription, Writable};
pub use domain::document::LoadedDocument;
pub use domain::geometry::{GeometryArgs, GeometryKind};
pub use domain::item::KeyedItem;
pub use domain::project::{Project, ProjectMap};
pub use domain::vector::{Quat, Triple, Vec3};
pub use state::{EditorState, EditorStore, StoreSubscription};
