//! Main application module

mod keyboard;
mod menus;
mod styles;

use eframe::egui;

use crate::planner;
use crate::state::{AppState, ViewMode};
use crate::ui::{catalog_panel, inspector, status_bar, toolbar};
use crate::viewport::ViewportPanel;

/// Main application
pub struct RoomPlanApp {
    state: AppState,
    viewport: ViewportPanel,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
}

impl RoomPlanApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        // Thumbnails are loaded through the egui image loaders
        egui_extras::install_image_loaders(&cc.egui_ctx);

        // Apply initial styles with font size from settings
        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);

        let mut viewport = ViewportPanel::new(&state.room);

        // Initialize GL renderer if glow context is available
        if let Some(gl) = cc.gl.as_ref() {
            viewport.init_gl(gl);
        }

        let last_font_size = state.settings.ui.font_size;

        Self {
            state,
            viewport,
            last_font_size,
        }
    }
}

impl eframe::App for RoomPlanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply font size if changed
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        // Persist settings touched outside the settings window
        if self.state.settings_dirty {
            self.state.settings.save();
            self.state.settings_dirty = false;
        }

        keyboard::handle_keyboard(ctx, &mut self.state, &mut self.viewport);

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, &mut self.state);
                menus::edit_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.state, &mut self.viewport);
                menus::settings_menu(ui, &mut self.state);
            });
        });

        // ── Settings window ──────────────────────────────────
        menus::settings_window(ctx, &mut self.state);

        // ── Toolbar ───────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                toolbar::show(ui, &mut self.state);
            });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        // ── Left panel: Catalog ──────────────────────────────
        if self.state.panels.catalog {
            egui::SidePanel::left("catalog")
                .default_width(210.0)
                .width_range(140.0..=400.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| {
                    catalog_panel::show(ui, &mut self.state);
                });
        }

        // ── Right panel: Inspector ───────────────────────────
        if self.state.panels.inspector {
            egui::SidePanel::right("inspector")
                .default_width(290.0)
                .width_range(200.0..=500.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical()
                        .id_salt("inspector_scroll")
                        .show(ui, |ui| {
                            inspector::show(ui, &mut self.state);
                        });
                });
        }

        // ── Central panel: active surface ────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| match self.state.view {
                ViewMode::Plan => planner::show(ui, &mut self.state),
                ViewMode::Walkthrough => self.viewport.show(ui, &mut self.state),
            });
    }
}
