//! Editor state - the four observable cells the sandbox UI shares
//!
//! - physics_active: simulation is running
//! - reset_rotation: bodies should snap back to their stored rotation
//! - global_state:   open projects as currently edited
//! - saved_state:    the same map as of the last save/load
//!
//! One `EditorState` is built at startup and handed to every consumer;
//! clones share the same cells.
//!
//! Project edits are in commands/, run flags in init/settings.rs,
//! save/revert/document handling in persist/.

use crate::core::store::Writable;
use crate::domain::project::{Project, ProjectMap};

#[path = "commands/commands.rs"]
mod commands;
#[path = "init/settings.rs"]
mod settings;
#[path = "persist/persist.rs"]
mod persist;
mod facade;

pub use facade::{EditorStore, StoreSubscription};

/// Process-wide editor state
#[derive(Clone)]
pub struct EditorState {
    physics_active: Writable<bool>,
    reset_rotation: Writable<bool>,
    global_state: Writable<Option<ProjectMap>>,
    saved_state: Writable<Option<ProjectMap>>,
}

impl EditorState {
    /// All cells start empty: `false, false, None, None`
    pub fn new() -> Self {
        Self {
            physics_active: Writable::new(false),
            reset_rotation: Writable::new(false),
            global_state: Writable::new(None),
            saved_state: Writable::new(None),
        }
    }

    pub fn physics_active(&self) -> &Writable<bool> { &self.physics_active }

    pub fn reset_rotation(&self) -> &Writable<bool> { &self.reset_rotation }

    pub fn global_state(&self) -> &Writable<Option<ProjectMap>> { &self.global_state }

    pub fn saved_state(&self) -> &Writable<Option<ProjectMap>> { &self.saved_state }

    // === RUN FLAGS ===

    /// Flip the simulation flag, returning the new value
    pub fn toggle_physics(&self) -> bool {
        settings::toggle_physics(self)
    }

    /// Ask the viewport to restore stored rotations
    pub fn request_rotation_reset(&self) {
        settings::request_rotation_reset(self);
    }

    /// Viewport reports the reset as done
    pub fn acknowledge_rotation_reset(&self) {
        settings::acknowledge_rotation_reset(self);
    }

    // === PROJECTS ===

    /// Add or replace a project in the global map (created on first use)
    pub fn open_project(&self, name: &str, project: Project) {
        commands::open_project(self, name, project);
    }

    /// Remove a project from the global map; returns whether it was open
    pub fn close_project(&self, name: &str) -> bool {
        commands::close_project(self, name)
    }

    pub fn project(&self, name: &str) -> Option<Project> {
        commands::project(self, name)
    }

    /// Names of open projects, sorted
    pub fn project_names(&self) -> Vec<String> {
        commands::project_names(self)
    }

    /// Mutate one open project in place and publish the result
    pub fn edit_project<R>(
        &self,
        name: &str,
        f: impl FnOnce(&mut Project) -> Result<R, String>,
    ) -> Result<R, String> {
        commands::edit_project(self, name, f)
    }

    // === SAVE / LOAD ===

    /// Projects whose global and saved versions differ, sorted
    pub fn dirty_projects(&self) -> Vec<String> {
        persist::dirty_projects(self)
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty_projects().is_empty()
    }

    /// Copy global state into saved state
    pub fn mark_saved(&self) {
        persist::mark_saved(self);
    }

    /// Copy saved state back over global state
    pub fn revert(&self) {
        persist::revert(self);
    }

    /// Serialize global state as a current-version document
    pub fn export_document(&self) -> Result<String, String> {
        persist::export_document(self)
    }

    /// Export, then mark the exported state as saved
    pub fn save_document(&self) -> Result<String, String> {
        persist::save_document(self)
    }

    /// Load a document (any supported version) into both global and saved
    /// state. Returns the source version when it was migrated.
    pub fn import_document(&self, json: &str) -> Result<Option<u32>, String> {
        persist::import_document(self, json)
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
