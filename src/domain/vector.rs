use serde::{Deserialize, Serialize};

/// 3D vector for placement and gravity, serialized as `{x, y, z}`
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Self { x: v[0], y: v[1], z: v[2] }
    }
}

/// Orientation as an `(x, y, z, w)` tuple, serialized as a 4-element array.
///
/// Not normalized; whatever the editor writes is kept as-is.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quat(pub f64, pub f64, pub f64, pub f64);

impl Quat {
    pub const IDENTITY: Self = Self(0.0, 0.0, 0.0, 1.0);

    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self(x, y, z, w)
    }

    pub fn x(&self) -> f64 { self.0 }
    pub fn y(&self) -> f64 { self.1 }
    pub fn z(&self) -> f64 { self.2 }
    pub fn w(&self) -> f64 { self.3 }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite() && self.1.is_finite() && self.2.is_finite() && self.3.is_finite()
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Velocity / force / impulse tuples are plain arrays on the wire.
pub type Triple = [f64; 3];

pub(crate) fn triple_is_finite(t: &Triple) -> bool {
    t.iter().all(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec3_serializes_as_object() {
        let json = serde_json::to_string(&Vec3::new(0.0, -9.8, 0.0)).unwrap();
        assert_eq!(json, r#"{"x":0.0,"y":-9.8,"z":0.0}"#);
    }

    #[test]
    fn quat_serializes_as_array() {
        let json = serde_json::to_string(&Quat::IDENTITY).unwrap();
        assert_eq!(json, "[0.0,0.0,0.0,1.0]");

        let q: Quat = serde_json::from_str("[0.1, 0.2, 0.3, 0.9]").unwrap();
        assert_eq!(q.w(), 0.9);
    }

    #[test]
    fn quat_rejects_wrong_length() {
        assert!(serde_json::from_str::<Quat>("[0, 0, 1]").is_err());
    }
}
