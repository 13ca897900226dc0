//! Editor defaults shared by the schema, the document format and the facade.

use crate::domain::vector::Vec3;

/// Document format written by `export_document`.
pub const DOCUMENT_FORMAT_VERSION: u32 = 2;

/// Bare `{ name: Project }` maps saved before the envelope existed.
pub const LEGACY_FORMAT_VERSION: u32 = 1;

/// Project-level keys that share the JSON object with item keys.
pub const RESERVED_ITEM_KEYS: [&str; 2] = ["gravity", "position"];

pub const DEFAULT_COLOR: &str = "#ffffff";

pub const DEFAULT_GRAVITY: Vec3 = Vec3 {
    x: 0.0,
    y: -9.81,
    z: 0.0,
};

pub const DEFAULT_BOX_ARGS: [f64; 3] = [1.0, 1.0, 1.0];
// radius, length, cap segments, radial segments
pub const DEFAULT_CAPSULE_ARGS: [f64; 4] = [0.5, 1.0, 4.0, 8.0];
// radius, width segments, height segments
pub const DEFAULT_SPHERE_ARGS: [f64; 3] = [1.0, 32.0, 16.0];
// radius top, radius bottom, height, radial segments
pub const DEFAULT_CYLINDER_ARGS: [f64; 4] = [1.0, 1.0, 1.0, 32.0];

pub fn is_reserved_item_key(key: &str) -> bool {
    RESERVED_ITEM_KEYS.contains(&key)
}
