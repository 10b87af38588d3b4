//! 3D walkthrough panel with OpenGL rendering

mod camera;
mod gl_renderer;
mod room;
pub use roomplan_gui_lib::viewport::{mesh, picking};

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use egui::Ui;
use shared::RoomSpec;

use crate::build::{AssetLibrary, LayoutMeshCache};
use crate::plan;
use crate::state::AppState;
use camera::OrbitCamera;
use gl_renderer::GlRenderer;
use mesh::MeshData;
use picking::{pick_nearest, ray_ground};

pub use room::{FLOOR_SWATCHES, WALL_SWATCHES};

/// 3D walkthrough panel: orbit camera, GL room rendering, pick and drag
pub struct ViewportPanel {
    camera: OrbitCamera,
    gl_renderer: Option<Arc<Mutex<GlRenderer>>>,
    cache: LayoutMeshCache,
    assets: AssetLibrary,
    /// Room the camera was last fitted to
    fitted_room: Option<RoomSpec>,
}

impl ViewportPanel {
    pub fn new(room: &RoomSpec) -> Self {
        Self {
            camera: OrbitCamera::for_room(room),
            gl_renderer: None,
            cache: LayoutMeshCache::new(),
            assets: AssetLibrary::new(),
            fitted_room: Some(*room),
        }
    }

    /// Initialize GL renderer (must be called with a GL context)
    pub fn init_gl(&mut self, gl: &glow::Context) {
        let renderer = GlRenderer::new(gl);
        self.gl_renderer = Some(Arc::new(Mutex::new(renderer)));
    }

    pub fn reset_camera(&mut self, room: &RoomSpec) {
        self.camera = OrbitCamera::for_room(room);
        self.fitted_room = Some(*room);
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) = ui.allocate_exact_size(
            ui.available_size(),
            egui::Sense::click_and_drag(),
        );

        // ── Keep the framing sane when the room is resized ──────────
        if self.fitted_room != Some(state.room) {
            self.camera.fit_room(&state.room);
            self.fitted_room = Some(state.room);
        }

        // ── Furniture drag / camera controls ────────────────────────
        self.handle_pointer(&response, ui, rect, state);

        // ── Scroll zoom ─────────────────────────────
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll.abs() > 0.1 {
            self.camera.zoom(scroll * 0.01);
        }

        // ── Build meshes BEFORE selection (so picking sees this frame's layout) ──
        self.rebuild_if_needed(state);

        // ── Item selection via click ──────────────────────────
        self.handle_selection(&response, ui, rect, state);

        if !ui.is_rect_visible(rect) {
            return;
        }

        // ── GL rendering ────────────────────────────────────────
        self.render_gl(ui, rect, state);

        // ── Overlays ─────────────────────────────────────
        self.draw_overlays(ui, rect, state);

        // Keep polling the loader while assets are still in flight
        if self.assets.pending() > 0 {
            ui.ctx().request_repaint_after(Duration::from_millis(100));
        }
    }

    fn handle_pointer(
        &mut self,
        response: &egui::Response,
        ui: &Ui,
        rect: egui::Rect,
        state: &mut AppState,
    ) {
        // ── Furniture drag handling ─────────────────────────────
        if state.interaction.dragging().is_some() {
            if response.dragged_by(egui::PointerButton::Primary) {
                if let Some(pos) = response
                    .interact_pointer_pos()
                    .or_else(|| response.hover_pos())
                {
                    let ray = self.camera.screen_ray(pos, rect);
                    self.drag_to_ground(&ray, state);
                }
            }
            // End drag when button released
            if response.drag_stopped() || !response.dragged_by(egui::PointerButton::Primary) {
                state.interaction.pointer_up();
            }
        } else {
            // ── Camera controls (only when not dragging furniture) ──
            if response.dragged_by(egui::PointerButton::Middle)
                || (response.dragged_by(egui::PointerButton::Primary)
                    && ui.input(|i| i.modifiers.alt))
            {
                let delta = response.drag_delta();
                self.camera.rotate(delta.x * 0.5, delta.y * 0.5);
            }

            if response.dragged_by(egui::PointerButton::Secondary) {
                let delta = response.drag_delta();
                self.camera.pan(delta.x * 0.01, delta.y * 0.01);
            }

            // ── Furniture drag start on LMB drag ───────────────
            if response.drag_started_by(egui::PointerButton::Primary)
                && !ui.input(|i| i.modifiers.alt)
            {
                let pointer_pos = response
                    .interact_pointer_pos()
                    .or_else(|| response.hover_pos());
                if let Some(pos) = pointer_pos {
                    let ray = self.camera.screen_ray(pos, rect);
                    // AABBs are from the previous rebuild; the layout has
                    // not changed since.
                    if let Some(id) = pick_nearest(&ray, self.cache.aabbs()) {
                        if let Some(anchor) = state.layout.get(&id).map(|p| p.pos) {
                            state.layout.begin_drag();
                            state.interaction.pointer_down_on(id, anchor);
                            self.drag_to_ground(&ray, state);
                        }
                    }
                }
            }
        }
    }

    /// Move the dragged item to where the pointer ray meets the floor,
    /// clamped so its footprint stays inside the room.
    fn drag_to_ground(&self, ray: &picking::Ray, state: &mut AppState) {
        let Some(id) = state.interaction.dragging().cloned() else {
            return;
        };
        let Some(hit) = ray_ground(ray) else {
            return;
        };
        let Some(placement) = state.layout.get(&id) else {
            return;
        };
        let half = plan::footprint_half_extents(
            placement.item.dims_m(),
            placement.scale,
            placement.rotation_deg,
        );
        let clamped = plan::clamp_world_to_room(&state.room, hit, half);
        let target = plan::world_to_plan(&state.room, clamped);
        state.layout.drag_to(&id, target);
    }

    fn handle_selection(
        &mut self,
        response: &egui::Response,
        ui: &Ui,
        rect: egui::Rect,
        state: &mut AppState,
    ) {
        if !response.clicked()
            || ui.input(|i| i.modifiers.alt)
            || state.interaction.dragging().is_some()
        {
            return;
        }

        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };

        let ray = self.camera.screen_ray(pos, rect);
        match pick_nearest(&ray, self.cache.aabbs()) {
            Some(id) => state.interaction.select(id),
            // Clicking floor or wall clears the selection, same as the plan
            None => state.interaction.deselect(),
        }
    }

    fn rebuild_if_needed(&mut self, state: &mut AppState) {
        self.assets.poll();

        let layout_version = state.layout.version();
        if !self
            .cache
            .is_valid(layout_version, &state.room, self.assets.version())
        {
            self.cache.rebuild(
                &state.room,
                state.layout.placements(),
                &mut self.assets,
                layout_version,
            );
            state.build_errors = self.cache.errors().clone();
        }
    }

    fn render_gl(&self, ui: &mut Ui, rect: egui::Rect, state: &AppState) {
        let Some(gl_renderer) = &self.gl_renderer else {
            return;
        };

        let renderer_clone = gl_renderer.clone();
        let camera = self.camera;

        let meshes: HashMap<String, MeshData> = self.cache.meshes_clone();
        let version = self.cache.rebuild_count();

        let room_spec = state.room;
        let floor = room::floor_color(state.settings.floor_swatch);
        let walls = room::wall_color(state.settings.wall_swatch);
        let bg_color = state.settings.viewport.background_color;
        let selection_color = state.settings.viewport.selection_color;
        let highlight = state.interaction.selected().cloned();

        let callback = egui::PaintCallback {
            rect,
            callback: Arc::new(eframe::egui_glow::CallbackFn::new(
                move |info, painter| {
                    let gl = painter.gl();

                    let clip = info.clip_rect_in_pixels();
                    let viewport = [
                        clip.left_px as f32,
                        clip.from_bottom_px as f32,
                        clip.width_px as f32,
                        clip.height_px as f32,
                    ];

                    if let Ok(mut r) = renderer_clone.lock() {
                        r.update_room(gl, &room_spec);
                        r.sync_from_meshes(gl, &meshes, version);

                        let render_params = gl_renderer::RenderParams {
                            viewport,
                            bg_color,
                            floor_color: floor,
                            wall_color: walls,
                            highlight: highlight.clone(),
                            selection_color,
                        };
                        r.paint(gl, &camera, &render_params);
                    }
                },
            )),
        };

        ui.painter().add(callback);
    }

    fn draw_overlays(&self, ui: &mut Ui, rect: egui::Rect, state: &AppState) {
        let painter = ui.painter_at(rect);

        self.draw_camera_info(&painter, rect);

        // Name tag floating above the selected item
        if let Some(placement) = state.selected_placement() {
            if let Some(aabb) = self.cache.aabbs().get(&placement.id) {
                let center = aabb.center();
                let top = [center.x, aabb.max.y + 0.15, center.z];
                if let Some(pos) = self.camera.project(top, rect) {
                    painter.text(
                        pos,
                        egui::Align2::CENTER_BOTTOM,
                        &placement.item.name,
                        egui::FontId::proportional(11.0),
                        egui::Color32::from_rgb(220, 220, 225),
                    );
                }
            }
        }

        // Navigation hint
        if state.layout.is_empty() {
            painter.text(
                egui::pos2(rect.center().x, rect.bottom() - 20.0),
                egui::Align2::CENTER_BOTTOM,
                "Drag from the catalog to furnish. Middle-drag orbits, right-drag pans, scroll zooms",
                egui::FontId::proportional(11.0),
                egui::Color32::from_rgb(100, 100, 110),
            );
        }
    }

    fn draw_camera_info(&self, painter: &egui::Painter, rect: egui::Rect) {
        let overlay_rect = egui::Rect::from_min_size(
            egui::pos2(rect.right() - 140.0, rect.top() + 4.0),
            egui::vec2(136.0, 44.0),
        );
        painter.rect_filled(
            overlay_rect,
            4.0,
            egui::Color32::from_rgba_premultiplied(0, 0, 0, 140),
        );
        painter.text(
            overlay_rect.min + egui::vec2(6.0, 4.0),
            egui::Align2::LEFT_TOP,
            format!(
                "Dist: {:.1}\nYaw: {:.0}  Pitch: {:.0}",
                self.camera.distance,
                self.camera.yaw.to_degrees(),
                self.camera.pitch.to_degrees(),
            ),
            egui::FontId::monospace(10.0),
            egui::Color32::from_rgb(160, 160, 170),
        );
    }
}
