//! Application menu bar and settings window

use eframe::egui;

use crate::state::{AppState, ViewMode};
use crate::viewport::ViewportPanel;

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("File", |ui| {
        if ui.button("New Layout").clicked() {
            state.layout.clear();
            state.interaction.deselect();
            state.build_errors.clear();
            ui.close_menu();
        }
        ui.separator();
        if ui.button("Export Layout…").clicked() {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title("Export layout")
                .add_filter("JSON", &["json"])
                .set_file_name("layout.json")
                .save_file()
            {
                match crate::export::write_summary(&path, &state.room, &state.layout) {
                    Ok(()) => tracing::info!("Exported layout to {}", path.display()),
                    Err(e) => tracing::error!("Failed to write layout: {e}"),
                }
            }
        }
        ui.separator();
        if ui.button("Quit").clicked() {
            std::process::exit(0);
        }
    });
}

/// Show the edit menu
pub fn edit_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("Edit", |ui| {
        if ui
            .add_enabled(state.layout.can_undo(), egui::Button::new("Undo"))
            .clicked()
        {
            state.undo();
            ui.close_menu();
        }
        if ui
            .add_enabled(state.layout.can_redo(), egui::Button::new("Redo"))
            .clicked()
        {
            state.redo();
            ui.close_menu();
        }
        ui.separator();
        if ui
            .add_enabled(
                state.interaction.selected().is_some(),
                egui::Button::new("Delete"),
            )
            .clicked()
        {
            if let Some(id) = state.interaction.selected().cloned() {
                state.remove_placement(&id);
            }
            ui.close_menu();
        }
        if ui.button("Deselect").clicked() {
            state.interaction.deselect();
            ui.close_menu();
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState, viewport: &mut ViewportPanel) {
    ui.menu_button("View", |ui| {
        ui.checkbox(&mut state.panels.catalog, "Catalog");
        ui.checkbox(&mut state.panels.inspector, "Inspector");
        ui.separator();
        if ui
            .selectable_label(state.view == ViewMode::Plan, "Plan")
            .clicked()
        {
            state.view = ViewMode::Plan;
            ui.close_menu();
        }
        if ui
            .selectable_label(state.view == ViewMode::Walkthrough, "3D Walkthrough")
            .clicked()
        {
            state.view = ViewMode::Walkthrough;
            ui.close_menu();
        }
        ui.separator();
        if ui.button("Reset Camera").clicked() {
            viewport.reset_camera(&state.room);
            ui.close_menu();
        }
    });
}

/// Show the settings menu
pub fn settings_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("Settings", |ui| {
        if ui.button("Preferences…").clicked() {
            state.show_settings = true;
            ui.close_menu();
        }
    });
}

/// Show the settings window
pub fn settings_window(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.show_settings;
    egui::Window::new("Settings")
        .open(&mut open)
        .resizable(true)
        .default_width(360.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                show_plan_settings(ui, state);
                show_viewport_settings(ui, state);
                show_ui_settings(ui, state);
                show_settings_buttons(ui, state);
            });
        });
    if !open {
        state.show_settings = false;
    }
}

fn show_plan_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Plan");
    ui.checkbox(&mut state.settings.plan.show_grid, "Show meter grid");
    ui.checkbox(&mut state.settings.plan.show_labels, "Show room dimensions");
    ui.checkbox(&mut state.settings.plan.warn_overlaps, "Highlight overlapping items");
    ui.add_space(10.0);
}

fn show_viewport_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Walkthrough");
    ui.horizontal(|ui| {
        ui.label("Background");
        let mut color = egui::Color32::from_rgb(
            state.settings.viewport.background_color[0],
            state.settings.viewport.background_color[1],
            state.settings.viewport.background_color[2],
        );
        if ui.color_edit_button_srgba(&mut color).changed() {
            state.settings.viewport.background_color = [color.r(), color.g(), color.b()];
        }
    });

    ui.horizontal(|ui| {
        ui.label("Selection highlight");
        let mut color = egui::Color32::from_rgb(
            state.settings.viewport.selection_color[0],
            state.settings.viewport.selection_color[1],
            state.settings.viewport.selection_color[2],
        );
        if ui.color_edit_button_srgba(&mut color).changed() {
            state.settings.viewport.selection_color = [color.r(), color.g(), color.b()];
        }
    });
    ui.add_space(10.0);
}

fn show_ui_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Interface");
    ui.horizontal(|ui| {
        ui.label("Font size");
        ui.add(
            egui::DragValue::new(&mut state.settings.ui.font_size)
                .speed(0.5)
                .range(8.0..=24.0)
                .suffix(" pt"),
        );
    });
    ui.add_space(10.0);
}

fn show_settings_buttons(ui: &mut egui::Ui, state: &mut AppState) {
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button("Apply").clicked() {
            state.settings.save();
        }
        if ui.button("Reset").clicked() {
            state.settings = crate::state::AppSettings::default();
        }
        if ui.button("Close").clicked() {
            state.show_settings = false;
        }
    });
}
