use serde::{Deserialize, Serialize};

use crate::core::settings::DEFAULT_COLOR;
use crate::domain::geometry::{GeometryArgs, GeometryKind};
use crate::domain::vector::{triple_is_finite, Quat, Triple, Vec3};

/// One simulated body of a project.
///
/// Identity is the key it is stored under in [`crate::domain::project::Project`];
/// the record itself carries no name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyedItem {
    // world
    pub position: Vec3,
    pub rotation: Quat,

    // physics
    pub additional_mass: f64,
    pub reset_on_ground: bool,
    pub initial_velocity: Triple,
    pub initial_force: Triple,
    pub initial_impulse: Triple,
    pub timer: f64,

    // material
    pub geometry_type: GeometryKind,
    pub geometry_args: GeometryArgs,
    pub color: String,
}

impl KeyedItem {
    /// A body of the given shape at the origin, at rest, default args
    pub fn new(kind: GeometryKind) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            additional_mass: 0.0,
            reset_on_ground: false,
            initial_velocity: [0.0; 3],
            initial_force: [0.0; 3],
            initial_impulse: [0.0; 3],
            timer: 0.0,
            geometry_type: kind,
            geometry_args: GeometryArgs::default(),
            color: DEFAULT_COLOR.to_string(),
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the active shape's arguments (arity checked)
    pub fn with_args(mut self, args: &[f64]) -> Result<Self, String> {
        self.geometry_args.set(self.geometry_type, args)?;
        Ok(self)
    }

    /// Arguments of the active shape
    pub fn active_args(&self) -> &[f64] {
        self.geometry_args.active(self.geometry_type)
    }

    /// Switch shape; the previous shape's arguments stay stored
    pub fn set_geometry(&mut self, kind: GeometryKind) {
        self.geometry_type = kind;
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.position.is_finite() {
            return Err("position has a non-finite component".to_string());
        }
        if !self.rotation.is_finite() {
            return Err("rotation has a non-finite component".to_string());
        }
        if !self.additional_mass.is_finite() {
            return Err("additionalMass is not finite".to_string());
        }
        if !triple_is_finite(&self.initial_velocity)
            || !triple_is_finite(&self.initial_force)
            || !triple_is_finite(&self.initial_impulse)
        {
            return Err("initial conditions have a non-finite component".to_string());
        }
        if !self.timer.is_finite() {
            return Err("timer is not finite".to_string());
        }
        if !self.geometry_args.is_finite() {
            return Err("geometryArgs has a non-finite component".to_string());
        }
        if self.color.trim().is_empty() {
            return Err("color is empty".to_string());
        }
        Ok(())
    }
}

impl Default for KeyedItem {
    fn default() -> Self {
        Self::new(GeometryKind::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_keys() {
        let item = KeyedItem::new(GeometryKind::Sphere);
        let value = serde_json::to_value(&item).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "position",
            "rotation",
            "additionalMass",
            "resetOnGround",
            "initialVelocity",
            "initialForce",
            "initialImpulse",
            "timer",
            "geometryType",
            "geometryArgs",
            "color",
        ] {
            assert!(obj.contains_key(key), "missing {}", key);
        }
        assert_eq!(obj["geometryType"], "Sphere");
    }

    #[test]
    fn switching_geometry_keeps_previous_args() {
        let mut item = KeyedItem::new(GeometryKind::Box)
            .with_args(&[2.0, 1.0, 0.5])
            .unwrap();
        item.set_geometry(GeometryKind::Capsule);
        assert_eq!(item.active_args().len(), 4);
        item.set_geometry(GeometryKind::Box);
        assert_eq!(item.active_args(), &[2.0, 1.0, 0.5]);
    }

    #[test]
    fn validate_catches_bad_numbers_and_empty_color() {
        assert!(KeyedItem::default().validate().is_ok());

        let mut item = KeyedItem::default();
        item.initial_force[1] = f64::NAN;
        assert!(item.validate().is_err());

        let item = KeyedItem::default().with_color("  ");
        assert_eq!(item.validate(), Err("color is empty".to_string()));
    }
}
