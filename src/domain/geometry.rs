use serde::{Deserialize, Serialize};

use crate::core::settings::{
    DEFAULT_BOX_ARGS, DEFAULT_CAPSULE_ARGS, DEFAULT_CYLINDER_ARGS, DEFAULT_SPHERE_ARGS,
};

/// Collider shape of a body
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    #[default]
    Box,
    Capsule,
    Sphere,
    Cylinder,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 4] = [
        GeometryKind::Box,
        GeometryKind::Capsule,
        GeometryKind::Sphere,
        GeometryKind::Cylinder,
    ];

    /// Number of numeric arguments this shape takes
    pub fn arity(self) -> usize {
        match self {
            GeometryKind::Box => 3,
            GeometryKind::Capsule => 4,
            GeometryKind::Sphere => 3,
            GeometryKind::Cylinder => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GeometryKind::Box => "Box",
            GeometryKind::Capsule => "Capsule",
            GeometryKind::Sphere => "Sphere",
            GeometryKind::Cylinder => "Cylinder",
        }
    }

    pub fn from_name(s: &str) -> Result<Self, String> {
        match s {
            "Box" => Ok(GeometryKind::Box),
            "Capsule" => Ok(GeometryKind::Capsule),
            "Sphere" => Ok(GeometryKind::Sphere),
            "Cylinder" => Ok(GeometryKind::Cylinder),
            _ => Err(format!("unknown geometry type: {}", s)),
        }
    }
}

/// Per-shape argument tuples.
///
/// The editor keeps the last arguments of every shape so switching
/// `geometryType` back and forth doesn't lose them; only the tuple of the
/// active kind is read by the renderer and the physics world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeometryArgs {
    #[serde(rename = "Box", default = "default_box")]
    pub box_args: [f64; 3],
    #[serde(rename = "Capsule", default = "default_capsule")]
    pub capsule: [f64; 4],
    #[serde(rename = "Sphere", default = "default_sphere")]
    pub sphere: [f64; 3],
    #[serde(rename = "Cylinder", default = "default_cylinder")]
    pub cylinder: [f64; 4],
}

fn default_box() -> [f64; 3] { DEFAULT_BOX_ARGS }
fn default_capsule() -> [f64; 4] { DEFAULT_CAPSULE_ARGS }
fn default_sphere() -> [f64; 3] { DEFAULT_SPHERE_ARGS }
fn default_cylinder() -> [f64; 4] { DEFAULT_CYLINDER_ARGS }

impl Default for GeometryArgs {
    fn default() -> Self {
        Self {
            box_args: DEFAULT_BOX_ARGS,
            capsule: DEFAULT_CAPSULE_ARGS,
            sphere: DEFAULT_SPHERE_ARGS,
            cylinder: DEFAULT_CYLINDER_ARGS,
        }
    }
}

impl GeometryArgs {
    /// Defaults with the tuple for `kind` taken from an untyped slice.
    ///
    /// Fails when `args.len()` doesn't match the shape's arity.
    pub fn with_args(kind: GeometryKind, args: &[f64]) -> Result<Self, String> {
        let mut out = Self::default();
        out.set(kind, args)?;
        Ok(out)
    }

    /// Arguments that matter for `kind`
    pub fn active(&self, kind: GeometryKind) -> &[f64] {
        match kind {
            GeometryKind::Box => &self.box_args[..],
            GeometryKind::Capsule => &self.capsule[..],
            GeometryKind::Sphere => &self.sphere[..],
            GeometryKind::Cylinder => &self.cylinder[..],
        }
    }

    /// Replace the tuple for `kind`, rejecting a mismatched arity
    pub fn set(&mut self, kind: GeometryKind, args: &[f64]) -> Result<(), String> {
        if args.len() != kind.arity() {
            return Err(format!(
                "{} takes {} arguments, got {}",
                kind.name(),
                kind.arity(),
                args.len()
            ));
        }
        match kind {
            GeometryKind::Box => self.box_args.copy_from_slice(args),
            GeometryKind::Capsule => self.capsule.copy_from_slice(args),
            GeometryKind::Sphere => self.sphere.copy_from_slice(args),
            GeometryKind::Cylinder => self.cylinder.copy_from_slice(args),
        }
        Ok(())
    }

    pub fn is_finite(&self) -> bool {
        GeometryKind::ALL
            .iter()
            .all(|k| self.active(*k).iter().all(|v| v.is_finite()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_table() {
        assert_eq!(GeometryKind::Box.arity(), 3);
        assert_eq!(GeometryKind::Capsule.arity(), 4);
        assert_eq!(GeometryKind::Sphere.arity(), 3);
        assert_eq!(GeometryKind::Cylinder.arity(), 4);
        for kind in GeometryKind::ALL {
            assert_eq!(GeometryArgs::default().active(kind).len(), kind.arity());
        }
    }

    #[test]
    fn with_args_rejects_mismatched_arity() {
        let err = GeometryArgs::with_args(GeometryKind::Sphere, &[1.0, 1.0, 1.0, 1.0]).unwrap_err();
        assert!(err.contains("Sphere takes 3"));
        assert!(GeometryArgs::with_args(GeometryKind::Capsule, &[1.0, 2.0]).is_err());

        let args = GeometryArgs::with_args(GeometryKind::Cylinder, &[0.5, 0.5, 2.0, 16.0]).unwrap();
        assert_eq!(args.active(GeometryKind::Cylinder), &[0.5, 0.5, 2.0, 16.0]);
        assert_eq!(args.box_args, DEFAULT_BOX_ARGS);
    }

    #[test]
    fn kind_uses_plain_names_on_the_wire() {
        assert_eq!(serde_json::to_string(&GeometryKind::Capsule).unwrap(), "\"Capsule\"");
        assert_eq!(GeometryKind::from_name("Cylinder"), Ok(GeometryKind::Cylinder));
        assert!(GeometryKind::from_name("Cone").is_err());
    }

    #[test]
    fn missing_tuples_take_defaults_but_wrong_length_fails() {
        let args: GeometryArgs = serde_json::from_str(r#"{"Sphere":[2,8,8]}"#).unwrap();
        assert_eq!(args.sphere, [2.0, 8.0, 8.0]);
        assert_eq!(args.capsule, DEFAULT_CAPSULE_ARGS);

        assert!(serde_json::from_str::<GeometryArgs>(r#"{"Box":[1,1]}"#).is_err());
    }
}
