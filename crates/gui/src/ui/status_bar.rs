use egui::Ui;

use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui| {
        ui.weak(format!("Items: {}", state.layout.len()));

        ui.separator();

        ui.label(format!("Total: ${:.2}", state.layout.total_price()));

        ui.separator();

        if let Some(placement) = state.selected_placement() {
            ui.label(format!("Selected: {}", placement.item.name));
        } else {
            ui.weak("Ready");
        }

        if !state.build_errors.is_empty() {
            ui.separator();
            ui.colored_label(
                egui::Color32::from_rgb(255, 160, 120),
                format!("Assets: {} failed", state.build_errors.len()),
            );
        }

        if state.settings.plan.warn_overlaps {
            let overlaps = state.overlapping_placements().len();
            if overlaps > 0 {
                ui.separator();
                ui.colored_label(
                    egui::Color32::from_rgb(230, 140, 60),
                    format!("Overlapping: {overlaps}"),
                );
            }
        }

        // Right-aligned catalog source and version
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak("RoomPlan v0.1");
            ui.separator();
            ui.weak(state.catalog.source().to_owned());
        });
    });
}
