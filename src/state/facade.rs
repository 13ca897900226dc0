use js_sys::Function;
use wasm_bindgen::prelude::*;

use crate::console_warn;
use crate::core::store::Subscription;
use crate::domain::document::{project_map_from_json, project_map_to_json};
use crate::domain::geometry::GeometryKind;
use crate::domain::item::KeyedItem;
use crate::domain::project::{Project, ProjectMap};

use super::EditorState;

/// Handle for a JS callback registered on one of the cells
#[wasm_bindgen]
pub struct StoreSubscription {
    inner: Option<Subscription>,
}

#[wasm_bindgen]
impl StoreSubscription {
    pub fn unsubscribe(&mut self) {
        if let Some(sub) = self.inner.take() {
            sub.unsubscribe();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.inner.as_ref().is_some_and(|s| s.is_active())
    }
}

/// Editor state as seen from the browser.
///
/// Project maps cross the boundary as JSON text; `null` means unset.
#[wasm_bindgen]
pub struct EditorStore {
    state: EditorState,
}

#[wasm_bindgen]
impl EditorStore {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            state: EditorState::new(),
        }
    }

    // === RUN FLAGS ===

    #[wasm_bindgen(getter)]
    pub fn physics_active(&self) -> bool {
        self.state.physics_active().get()
    }

    #[wasm_bindgen(setter)]
    pub fn set_physics_active(&self, active: bool) {
        self.state.physics_active().set(active);
    }

    pub fn toggle_physics(&self) -> bool {
        self.state.toggle_physics()
    }

    #[wasm_bindgen(getter)]
    pub fn reset_rotation(&self) -> bool {
        self.state.reset_rotation().get()
    }

    #[wasm_bindgen(setter)]
    pub fn set_reset_rotation(&self, reset: bool) {
        self.state.reset_rotation().set(reset);
    }

    pub fn request_rotation_reset(&self) {
        self.state.request_rotation_reset();
    }

    pub fn acknowledge_rotation_reset(&self) {
        self.state.acknowledge_rotation_reset();
    }

    /// `callback(active: boolean)`, called now and on every write
    pub fn subscribe_physics_active(&self, callback: Function) -> StoreSubscription {
        let sub = self
            .state
            .physics_active()
            .subscribe(move |v| call_js(&callback, &JsValue::from_bool(*v)));
        StoreSubscription { inner: Some(sub) }
    }

    pub fn subscribe_reset_rotation(&self, callback: Function) -> StoreSubscription {
        let sub = self
            .state
            .reset_rotation()
            .subscribe(move |v| call_js(&callback, &JsValue::from_bool(*v)));
        StoreSubscription { inner: Some(sub) }
    }

    // === PROJECT MAPS ===

    pub fn get_global_state_json(&self) -> JsValue {
        self.state.global_state().with(map_to_js)
    }

    pub fn set_global_state_json(&self, json: Option<String>) -> Result<(), JsValue> {
        let projects = parse_optional_map(json)?;
        self.state.global_state().set(projects);
        Ok(())
    }

    pub fn get_saved_state_json(&self) -> JsValue {
        self.state.saved_state().with(map_to_js)
    }

    pub fn set_saved_state_json(&self, json: Option<String>) -> Result<(), JsValue> {
        let projects = parse_optional_map(json)?;
        self.state.saved_state().set(projects);
        Ok(())
    }

    /// `callback(json: string | null)`
    pub fn subscribe_global_state(&self, callback: Function) -> StoreSubscription {
        let sub = self
            .state
            .global_state()
            .subscribe(move |v| call_js(&callback, &map_to_js(v)));
        StoreSubscription { inner: Some(sub) }
    }

    pub fn subscribe_saved_state(&self, callback: Function) -> StoreSubscription {
        let sub = self
            .state
            .saved_state()
            .subscribe(move |v| call_js(&callback, &map_to_js(v)));
        StoreSubscription { inner: Some(sub) }
    }

    pub fn open_project_json(&self, name: String, json: String) -> Result<(), JsValue> {
        let project: Project = serde_json::from_str(&json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        project.validate().map_err(|e| JsValue::from_str(&e))?;
        self.state.open_project(&name, project);
        Ok(())
    }

    /// Open an empty project with default gravity
    pub fn new_project(&self, name: String) {
        self.state.open_project(&name, Project::default());
    }

    pub fn close_project(&self, name: String) -> bool {
        self.state.close_project(&name)
    }

    pub fn project_names(&self) -> Vec<String> {
        self.state.project_names()
    }

    // === ITEMS ===

    pub fn insert_item_json(&self, project: String, key: String, json: String) -> Result<(), JsValue> {
        let item: KeyedItem = serde_json::from_str(&json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        item.validate().map_err(|e| JsValue::from_str(&e))?;
        self.state
            .edit_project(&project, |p| p.insert_item(key, item).map(|_| ()))
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Add a default body of the named shape
    pub fn add_item(&self, project: String, key: String, geometry_type: String) -> Result<(), JsValue> {
        let kind = GeometryKind::from_name(&geometry_type).map_err(|e| JsValue::from_str(&e))?;
        self.state
            .edit_project(&project, |p| p.insert_item(key, KeyedItem::new(kind)).map(|_| ()))
            .map_err(|e| JsValue::from_str(&e))
    }

    pub fn remove_item(&self, project: String, key: String) -> Result<bool, JsValue> {
        self.state
            .edit_project(&project, |p| Ok(p.remove_item(&key).is_some()))
            .map_err(|e| JsValue::from_str(&e))
    }

    pub fn rename_item(&self, project: String, from: String, to: String) -> Result<(), JsValue> {
        self.state
            .edit_project(&project, |p| p.rename_item(&from, &to))
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Switch an item's shape and set that shape's arguments (arity checked)
    pub fn set_item_geometry(
        &self,
        project: String,
        key: String,
        geometry_type: String,
        args: &[f64],
    ) -> Result<(), JsValue> {
        let kind = GeometryKind::from_name(&geometry_type).map_err(|e| JsValue::from_str(&e))?;
        self.state
            .edit_project(&project, |p| {
                let item = p
                    .item_mut(&key)
                    .ok_or_else(|| format!("no item named {}", key))?;
                item.geometry_args.set(kind, args)?;
                item.set_geometry(kind);
                Ok(())
            })
            .map_err(|e| JsValue::from_str(&e))
    }

    // === SAVE / LOAD ===

    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    pub fn dirty_projects(&self) -> Vec<String> {
        self.state.dirty_projects()
    }

    pub fn mark_saved(&self) {
        self.state.mark_saved();
    }

    pub fn revert(&self) {
        self.state.revert();
    }

    pub fn export_document(&self) -> Result<String, JsValue> {
        self.state.export_document().map_err(|e| JsValue::from_str(&e))
    }

    pub fn save_document(&self) -> Result<String, JsValue> {
        self.state.save_document().map_err(|e| JsValue::from_str(&e))
    }

    /// Returns the source format version when the document was migrated
    pub fn import_document(&self, json: String) -> Result<Option<u32>, JsValue> {
        self.state
            .import_document(&json)
            .map_err(|e| JsValue::from_str(&e))
    }
}

impl Default for EditorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorStore {
    /// Shared state behind this handle, for Rust-side consumers
    pub fn state(&self) -> &EditorState {
        &self.state
    }
}

fn call_js(callback: &Function, arg: &JsValue) {
    if let Err(e) = callback.call1(&JsValue::NULL, arg) {
        console_warn!("store subscriber threw: {:?}", e);
    }
}

fn map_to_js(projects: &Option<ProjectMap>) -> JsValue {
    match projects {
        None => JsValue::NULL,
        Some(projects) => match project_map_to_json(projects) {
            Ok(json) => JsValue::from_str(&json),
            Err(e) => {
                console_warn!("failed to serialize projects: {}", e);
                JsValue::NULL
            }
        },
    }
}

fn parse_optional_map(json: Option<String>) -> Result<Option<ProjectMap>, JsValue> {
    match json {
        None => Ok(None),
        Some(json) => project_map_from_json(&json)
            .map(Some)
            .map_err(|e| JsValue::from_str(&e)),
    }
}
