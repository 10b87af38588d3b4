//! Inspector panel for the selected placement

use egui::Ui;

use crate::state::AppState;

/// Arrow-button and keyboard move step, in percent of the room side
pub const NUDGE_STEP_PCT: f32 = 2.0;
pub const ROTATE_STEP_DEG: f32 = 15.0;
pub const SCALE_STEP: f32 = 0.1;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Inspector");
    ui.separator();

    let Some(placement) = state.selected_placement() else {
        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            ui.weak("Select an item");
            ui.weak("to edit its placement");
        });
        return;
    };

    // Copy out so the buttons below can mutate the layout
    let id = placement.id.clone();
    let name = placement.item.name.clone();
    let category = placement.item.category.label();
    let price = placement.item.price;
    let dims = placement.item.dims_m();
    let pos = placement.pos;
    let rotation = placement.rotation_deg;
    let scale = placement.scale;
    let build_error = state.build_errors.get(&id).cloned();

    ui.strong(name);
    ui.add_space(4.0);

    egui::CollapsingHeader::new("Item")
        .id_salt("inspector_item")
        .default_open(true)
        .show(ui, |ui| {
            egui::Grid::new("item_props")
                .num_columns(2)
                .spacing([8.0, 4.0])
                .show(ui, |ui| {
                    ui.label("ID:");
                    ui.monospace(short_id(&id));
                    ui.end_row();

                    ui.label("Category:");
                    ui.label(category);
                    ui.end_row();

                    ui.label("Price:");
                    ui.label(format!("${price:.2}"));
                    ui.end_row();

                    ui.label("Size:");
                    ui.label(format!("{:.2}×{:.2}×{:.2} m", dims[0], dims[1], dims[2]));
                    ui.end_row();
                });
        });

    ui.add_space(8.0);
    egui::CollapsingHeader::new("Placement")
        .id_salt("inspector_placement")
        .default_open(true)
        .show(ui, |ui| {
            egui::Grid::new("placement_props")
                .num_columns(2)
                .spacing([8.0, 4.0])
                .show(ui, |ui| {
                    ui.label("Position:");
                    ui.label(format!("{:.1}%, {:.1}%", pos.x, pos.y));
                    ui.end_row();

                    ui.label("Rotation:");
                    ui.label(format!("{rotation:.0}°"));
                    ui.end_row();

                    ui.label("Scale:");
                    ui.label(format!("×{scale:.2}"));
                    ui.end_row();
                });

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label("Move:");
                if ui.button("←").clicked() {
                    state.layout.nudge(&id, -NUDGE_STEP_PCT, 0.0);
                }
                if ui.button("→").clicked() {
                    state.layout.nudge(&id, NUDGE_STEP_PCT, 0.0);
                }
                if ui.button("↑").clicked() {
                    state.layout.nudge(&id, 0.0, -NUDGE_STEP_PCT);
                }
                if ui.button("↓").clicked() {
                    state.layout.nudge(&id, 0.0, NUDGE_STEP_PCT);
                }
            });
            ui.horizontal(|ui| {
                ui.label("Rotate:");
                if ui.button("⟲ 15°").clicked() {
                    state.layout.rotate(&id, -ROTATE_STEP_DEG);
                }
                if ui.button("⟳ 15°").clicked() {
                    state.layout.rotate(&id, ROTATE_STEP_DEG);
                }
            });
            ui.horizontal(|ui| {
                ui.label("Scale:");
                if ui.button("➖").clicked() {
                    state.layout.rescale(&id, -SCALE_STEP);
                }
                if ui.button("➕").clicked() {
                    state.layout.rescale(&id, SCALE_STEP);
                }
            });
        });

    if let Some(err) = build_error {
        ui.add_space(8.0);
        ui.colored_label(
            egui::Color32::from_rgb(255, 160, 120),
            format!("Asset fallback: {err}"),
        );
    }

    ui.add_space(12.0);
    if ui.button("🗑 Remove").clicked() {
        state.remove_placement(&id);
    }
}

fn short_id(id: &str) -> &str {
    if id.len() > 8 {
        &id[..8]
    } else {
        id
    }
}
