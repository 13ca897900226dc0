use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::settings::{is_reserved_item_key, DEFAULT_GRAVITY};
use crate::domain::item::KeyedItem;
use crate::domain::vector::Vec3;

/// Project name -> project, the shape of both global and saved state
pub type ProjectMap = BTreeMap<String, Project>;

/// One editable physics scene.
///
/// In memory the bodies live in their own map. On the wire they are
/// flattened next to `gravity` and `position`, which is why those two names
/// can't be used as item keys.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub gravity: Vec3,
    /// Timeline cursor of the scene
    pub position: f64,
    #[serde(flatten)]
    items: BTreeMap<String, KeyedItem>,
}

impl Project {
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity,
            position: 0.0,
            items: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, key: &str) -> Option<&KeyedItem> {
        self.items.get(key)
    }

    pub fn item_mut(&mut self, key: &str) -> Option<&mut KeyedItem> {
        self.items.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// Items in key order
    pub fn items(&self) -> impl Iterator<Item = (&str, &KeyedItem)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(|k| k.as_str())
    }

    /// Insert or replace the item at `key`, returning the replaced one
    pub fn insert_item(
        &mut self,
        key: impl Into<String>,
        item: KeyedItem,
    ) -> Result<Option<KeyedItem>, String> {
        let key = key.into();
        check_item_key(&key)?;
        Ok(self.items.insert(key, item))
    }

    pub fn remove_item(&mut self, key: &str) -> Option<KeyedItem> {
        self.items.remove(key)
    }

    /// Move an item to a new key; fails if `to` is taken or invalid
    pub fn rename_item(&mut self, from: &str, to: &str) -> Result<(), String> {
        if from == to {
            return if self.items.contains_key(from) {
                Ok(())
            } else {
                Err(format!("no item named {}", from))
            };
        }
        check_item_key(to)?;
        if self.items.contains_key(to) {
            return Err(format!("item {} already exists", to));
        }
        let item = self
            .items
            .remove(from)
            .ok_or_else(|| format!("no item named {}", from))?;
        self.items.insert(to.to_string(), item);
        Ok(())
    }

    /// Check scene-level numbers, every key and every item
    pub fn validate(&self) -> Result<(), String> {
        if !self.gravity.is_finite() {
            return Err("gravity has a non-finite component".to_string());
        }
        if !self.position.is_finite() {
            return Err("position is not finite".to_string());
        }
        for (key, item) in self.items.iter() {
            check_item_key(key)?;
            item.validate().map_err(|e| format!("item {}: {}", key, e))?;
        }
        Ok(())
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY)
    }
}

fn check_item_key(key: &str) -> Result<(), String> {
    if key.is_empty() {
        return Err("item key is empty".to_string());
    }
    if is_reserved_item_key(key) {
        return Err(format!("item key {} is reserved", key));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::GeometryKind;

    fn ball() -> KeyedItem {
        KeyedItem::new(GeometryKind::Sphere)
            .with_args(&[1.0, 1.0, 1.0])
            .unwrap()
    }

    #[test]
    fn items_flatten_next_to_scene_fields() {
        let mut project = Project::new(Vec3::new(0.0, -9.8, 0.0));
        project.insert_item("ball1", ball()).unwrap();

        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["gravity"]["y"], -9.8);
        assert_eq!(value["position"], 0.0);
        assert_eq!(value["ball1"]["geometryType"], "Sphere");
        assert_eq!(value["ball1"]["geometryArgs"]["Sphere"][0], 1.0);

        let back: Project = serde_json::from_value(value).unwrap();
        assert_eq!(back, project);
    }

    #[test]
    fn insert_at_existing_key_replaces() {
        let mut project = Project::default();
        assert_eq!(project.insert_item("a", ball()).unwrap(), None);

        let cube = KeyedItem::new(GeometryKind::Box);
        let old = project.insert_item("a", cube.clone()).unwrap();
        assert_eq!(old, Some(ball()));
        assert_eq!(project.len(), 1);
        assert_eq!(project.item("a"), Some(&cube));
    }

    #[test]
    fn reserved_and_empty_keys_are_rejected() {
        let mut project = Project::default();
        assert!(project.insert_item("gravity", ball()).is_err());
        assert!(project.insert_item("position", ball()).is_err());
        assert!(project.insert_item("", ball()).is_err());
        assert!(project.is_empty());
    }

    #[test]
    fn rename_moves_item() {
        let mut project = Project::default();
        project.insert_item("a", ball()).unwrap();
        project.insert_item("b", KeyedItem::default()).unwrap();

        assert!(project.rename_item("a", "b").is_err());
        assert!(project.rename_item("a", "position").is_err());
        assert!(project.rename_item("missing", "c").is_err());

        project.rename_item("a", "c").unwrap();
        assert!(!project.contains("a"));
        assert_eq!(project.item("c"), Some(&ball()));
        assert_eq!(project.keys().collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn non_item_extra_key_fails_to_parse() {
        let json = r#"{"gravity":{"x":0,"y":-9.8,"z":0},"position":0,"oops":3}"#;
        assert!(serde_json::from_str::<Project>(json).is_err());
    }
}
