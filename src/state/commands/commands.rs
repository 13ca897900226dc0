use crate::console_log;
use crate::domain::project::{Project, ProjectMap};

use super::EditorState;

pub(super) fn open_project(state: &EditorState, name: &str, project: Project) {
    state.global_state.update(|current| {
        let mut projects = current.clone().unwrap_or_default();
        projects.insert(name.to_string(), project);
        Some(projects)
    });
    console_log!("opened project {}", name);
}

pub(super) fn close_project(state: &EditorState, name: &str) -> bool {
    let is_open = state
        .global_state
        .with(|current| current.as_ref().is_some_and(|p| p.contains_key(name)));
    if !is_open {
        return false;
    }

    state.global_state.update(|current| {
        let mut projects = current.clone().unwrap_or_default();
        projects.remove(name);
        Some(projects)
    });
    console_log!("closed project {}", name);
    true
}

pub(super) fn project(state: &EditorState, name: &str) -> Option<Project> {
    state
        .global_state
        .with(|current| current.as_ref().and_then(|p| p.get(name).cloned()))
}

pub(super) fn project_names(state: &EditorState) -> Vec<String> {
    state.global_state.with(|current| {
        current
            .as_ref()
            .map(|p| p.keys().cloned().collect())
            .unwrap_or_default()
    })
}

/// Edits run on a copy; subscribers only see the result when `f` succeeds
pub(super) fn edit_project<R>(
    state: &EditorState,
    name: &str,
    f: impl FnOnce(&mut Project) -> Result<R, String>,
) -> Result<R, String> {
    let mut projects: ProjectMap = state
        .global_state
        .get()
        .ok_or_else(|| format!("no project named {}", name))?;
    let project = projects
        .get_mut(name)
        .ok_or_else(|| format!("no project named {}", name))?;

    let out = f(project)?;
    state.global_state.set(Some(projects));
    Ok(out)
}
