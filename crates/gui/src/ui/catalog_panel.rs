//! Catalog panel: browsable furniture list, drag source for the plan

use std::sync::Arc;

use egui::Ui;
use shared::CatalogItem;

use crate::plan::PlanPos;
use crate::planner::DragItem;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading("Catalog");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(format!("({})", state.catalog.len()));
        });
    });
    ui.weak(state.catalog.source().to_owned());
    ui.separator();

    if state.catalog.is_empty() {
        ui.add_space(20.0);
        ui.vertical_centered(|ui| {
            ui.weak("No items in the catalog");
        });
        return;
    }

    egui::ScrollArea::vertical()
        .id_salt("catalog_scroll")
        .show(ui, |ui| {
            // Collect first so rows can mutate layout state
            let items: Vec<Arc<CatalogItem>> = state.catalog.items().to_vec();
            for item in &items {
                show_row(ui, state, item);
            }
        });
}

fn show_row(ui: &mut Ui, state: &mut AppState, item: &Arc<CatalogItem>) {
    let row_id = egui::Id::new(("catalog_row", &item.id));

    ui.dnd_drag_source(row_id, DragItem(item.id.clone()), |ui| {
        egui::Frame::NONE
            .inner_margin(egui::Margin::symmetric(4, 3))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    if let Some(ref thumb) = item.thumbnail {
                        ui.add(
                            egui::Image::new(format!("file://{thumb}"))
                                .fit_to_exact_size(egui::vec2(28.0, 28.0))
                                .corner_radius(3.0),
                        );
                    }
                    ui.vertical(|ui| {
                        ui.label(&item.name);
                        let dims = item.dims_m();
                        ui.weak(format!(
                            "{} · {:.2}×{:.2} m · ${:.2}",
                            item.category.label(),
                            dims[0],
                            dims[2],
                            item.price,
                        ));
                    });
                    ui.with_layout(
                        egui::Layout::right_to_left(egui::Align::Center),
                        |ui| {
                            if ui
                                .small_button("Add")
                                .on_hover_text("Place in the room center")
                                .clicked()
                            {
                                let id = state.layout.place(item.clone(), PlanPos::CENTER);
                                state.interaction.select(id);
                            }
                        },
                    );
                });
            });
    });
}
