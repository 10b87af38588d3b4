//! Keyboard shortcut handling

use eframe::egui;

use crate::state::AppState;
use crate::ui::inspector;
use crate::viewport::ViewportPanel;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(
    ctx: &egui::Context,
    state: &mut AppState,
    viewport: &mut ViewportPanel,
) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    ctx.input(|i| {
        // Ctrl+Z: undo
        if i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift {
            state.undo();
        }
        // Ctrl+Shift+Z or Ctrl+Y: redo
        if (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
            || (i.modifiers.command && i.key_pressed(egui::Key::Y))
        {
            state.redo();
        }
        // Escape: deselect
        if i.key_pressed(egui::Key::Escape) {
            handle_escape(state);
        }
        // Delete: remove the selected placement
        if i.key_pressed(egui::Key::Delete) {
            handle_delete(state);
        }
        // Arrows: nudge the selected placement on the plan
        if i.key_pressed(egui::Key::ArrowLeft) {
            nudge_selected(state, -inspector::NUDGE_STEP_PCT, 0.0);
        }
        if i.key_pressed(egui::Key::ArrowRight) {
            nudge_selected(state, inspector::NUDGE_STEP_PCT, 0.0);
        }
        if i.key_pressed(egui::Key::ArrowUp) {
            nudge_selected(state, 0.0, -inspector::NUDGE_STEP_PCT);
        }
        if i.key_pressed(egui::Key::ArrowDown) {
            nudge_selected(state, 0.0, inspector::NUDGE_STEP_PCT);
        }
        // F: frame the room in the walkthrough camera
        if i.key_pressed(egui::Key::F) && !i.modifiers.command {
            viewport.reset_camera(&state.room);
        }
    });
}

fn handle_escape(state: &mut AppState) {
    // A drag ends on pointer release, not on Escape
    if state.interaction.dragging().is_some() {
        return;
    }
    state.interaction.deselect();
}

fn handle_delete(state: &mut AppState) {
    if let Some(id) = state.interaction.selected().cloned() {
        state.remove_placement(&id);
    }
}

fn nudge_selected(state: &mut AppState, dx_pct: f32, dy_pct: f32) {
    if state.interaction.dragging().is_some() {
        return;
    }
    if let Some(id) = state.interaction.selected().cloned() {
        state.layout.nudge(&id, dx_pct, dy_pct);
    }
}
