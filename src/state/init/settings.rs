use super::EditorState;

pub(super) fn toggle_physics(state: &EditorState) -> bool {
    let next = !state.physics_active.get();
    state.physics_active.set(next);
    next
}

pub(super) fn request_rotation_reset(state: &EditorState) {
    state.reset_rotation.set(true);
}

pub(super) fn acknowledge_rotation_reset(state: &EditorState) {
    state.reset_rotation.set(false);
}
