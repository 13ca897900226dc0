use std::collections::BTreeSet;

use crate::domain::document::{from_document_json, to_document_json};
use crate::domain::project::ProjectMap;
use crate::{console_log, console_warn};

use super::EditorState;

/// An unset map and an empty map both mean "no projects"
pub(super) fn dirty_projects(state: &EditorState) -> Vec<String> {
    state.global_state.with(|global| {
        state.saved_state.with(|saved| {
            let empty = ProjectMap::new();
            let global = global.as_ref().unwrap_or(&empty);
            let saved = saved.as_ref().unwrap_or(&empty);

            let names: BTreeSet<&String> = global.keys().chain(saved.keys()).collect();
            names
                .into_iter()
                .filter(|name| global.get(*name) != saved.get(*name))
                .cloned()
                .collect()
        })
    })
}

pub(super) fn mark_saved(state: &EditorState) {
    state.saved_state.set(state.global_state.get());
    console_log!("state marked as saved");
}

pub(super) fn revert(state: &EditorState) {
    state.global_state.set(state.saved_state.get());
    console_log!("reverted to saved state");
}

pub(super) fn export_document(state: &EditorState) -> Result<String, String> {
    state
        .global_state
        .with(|global| match global {
            Some(projects) => to_document_json(projects),
            None => to_document_json(&ProjectMap::new()),
        })
}

pub(super) fn save_document(state: &EditorState) -> Result<String, String> {
    let json = export_document(state)?;
    mark_saved(state);
    Ok(json)
}

pub(super) fn import_document(state: &EditorState, json: &str) -> Result<Option<u32>, String> {
    let doc = match from_document_json(json) {
        Ok(doc) => doc,
        Err(e) => {
            console_warn!("document rejected: {}", e);
            return Err(e);
        }
    };

    if let Some(version) = doc.migrated_from {
        console_log!("migrated document from format version {}", version);
    }
    console_log!("loaded {} project(s)", doc.projects.len());

    state.saved_state.set(Some(doc.projects.clone()));
    state.global_state.set(Some(doc.projects));
    Ok(doc.migrated_from)
}
