//! Toolbar: room dimension form, view switch, undo/redo, surface swatches

use egui::Ui;

use crate::state::{AppState, ViewMode};
use crate::viewport::{FLOOR_SWATCHES, WALL_SWATCHES};

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        // ── Room dimensions ──
        ui.label("Room:");
        let width_edit = ui.add(
            egui::TextEdit::singleline(&mut state.room_form.width_text).desired_width(44.0),
        );
        ui.label("×");
        let length_edit = ui.add(
            egui::TextEdit::singleline(&mut state.room_form.length_text).desired_width(44.0),
        );
        ui.label("m");

        let submitted = (width_edit.lost_focus() || length_edit.lost_focus())
            && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Apply").clicked() || submitted {
            apply_room_form(state);
        }
        if let Some(ref err) = state.room_form.error {
            ui.colored_label(egui::Color32::from_rgb(255, 120, 100), err);
        }

        ui.separator();

        // ── View switch ──
        ui.selectable_value(&mut state.view, ViewMode::Plan, "Plan");
        ui.selectable_value(&mut state.view, ViewMode::Walkthrough, "3D");

        ui.separator();

        // ── Undo / redo ──
        if ui
            .add_enabled(state.layout.can_undo(), egui::Button::new("↩ Undo"))
            .clicked()
        {
            state.undo();
        }
        if ui
            .add_enabled(state.layout.can_redo(), egui::Button::new("↪ Redo"))
            .clicked()
        {
            state.redo();
        }

        ui.separator();

        // ── Surface swatches ──
        ui.label("Floor:");
        for (i, (name, rgb)) in FLOOR_SWATCHES.iter().enumerate() {
            if swatch_button(ui, state.settings.floor_swatch == i, name, *rgb) {
                state.settings.floor_swatch = i;
                state.settings_dirty = true;
            }
        }
        ui.label("Walls:");
        for (i, (name, rgb)) in WALL_SWATCHES.iter().enumerate() {
            if swatch_button(ui, state.settings.wall_swatch == i, name, *rgb) {
                state.settings.wall_swatch = i;
                state.settings_dirty = true;
            }
        }
    });
}

pub fn apply_room_form(state: &mut AppState) {
    if let Some(room) = state.room_form.try_apply() {
        state.room = room;
        tracing::info!("Room resized to {}x{} m", room.width, room.length);
    }
}

fn swatch_button(ui: &mut Ui, selected: bool, name: &str, rgb: [f32; 3]) -> bool {
    let size = egui::vec2(16.0, 16.0);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());

    let color = egui::Color32::from_rgb(
        (rgb[0] * 255.0) as u8,
        (rgb[1] * 255.0) as u8,
        (rgb[2] * 255.0) as u8,
    );
    let stroke = if selected {
        egui::Stroke::new(2.0, egui::Color32::WHITE)
    } else {
        egui::Stroke::new(1.0, egui::Color32::from_gray(90))
    };
    ui.painter().rect_filled(rect, 3.0, color);
    ui.painter()
        .rect_stroke(rect, 3.0, stroke, egui::StrokeKind::Inside);

    response.on_hover_text(name).clicked()
}
