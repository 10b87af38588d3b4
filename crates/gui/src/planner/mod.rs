//! 2D top-down plan: scaled room outline, furniture footprints, drop
//! placement and pointer-driven manipulation.

use std::collections::HashSet;

use egui::{pos2, vec2, Color32, Pos2, Rect, Sense, Shape, Stroke, Ui};
use glam::{Vec2, Vec3};
use shared::RoomSpec;

use crate::plan::{self, PlanPos};
use crate::state::AppState;

/// Payload carried while a catalog entry is dragged onto the plan
#[derive(Clone)]
pub struct DragItem(pub String);

const ROOM_MARGIN: f32 = 24.0;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    let (outer, response) =
        ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
    let room_rect = fit_room_rect(outer, &state.room);

    handle_pointer(&response, room_rect, state);
    handle_drop(ui, &response, room_rect, state);

    if !ui.is_rect_visible(outer) {
        return;
    }

    let painter = ui.painter_at(outer);
    painter.rect_filled(outer, 0.0, Color32::from_rgb(24, 24, 27));
    draw_room(&painter, room_rect, state);
    draw_placements(ui, &painter, room_rect, state);

    if state.layout.is_empty() {
        painter.text(
            pos2(outer.center().x, outer.bottom() - 20.0),
            egui::Align2::CENTER_BOTTOM,
            "Drag furniture from the catalog onto the plan",
            egui::FontId::proportional(11.0),
            Color32::from_rgb(100, 100, 110),
        );
    }
}

/// Largest rect with the room's aspect ratio that fits the panel.
fn fit_room_rect(outer: Rect, room: &RoomSpec) -> Rect {
    let avail = outer.shrink(ROOM_MARGIN);
    let aspect = (room.width / room.length) as f32;
    let size = if avail.width() / avail.height() > aspect {
        vec2(avail.height() * aspect, avail.height())
    } else {
        vec2(avail.width(), avail.width() / aspect)
    };
    Rect::from_center_size(avail.center(), size)
}

/// World floor point (x, z in meters) to plan pixels.
fn world_to_screen(room_rect: Rect, room: &RoomSpec, p: Vec2) -> Pos2 {
    pos2(
        room_rect.left() + (p.x / room.width as f32 + 0.5) * room_rect.width(),
        room_rect.top() + (p.y / room.length as f32 + 0.5) * room_rect.height(),
    )
}

fn screen_to_world(room_rect: Rect, room: &RoomSpec, pos: Pos2) -> Vec3 {
    let fx = (pos.x - room_rect.left()) / room_rect.width() - 0.5;
    let fz = (pos.y - room_rect.top()) / room_rect.height() - 0.5;
    Vec3::new(fx * room.width as f32, 0.0, fz * room.length as f32)
}

// ── Pointer handling ──────────────────────────────────────────

fn handle_pointer(response: &egui::Response, room_rect: Rect, state: &mut AppState) {
    // ── Drag in progress ────────────────────────────────────
    if state.interaction.dragging().is_some() {
        if response.dragged_by(egui::PointerButton::Primary) {
            if let Some(pos) = response
                .interact_pointer_pos()
                .or_else(|| response.hover_pos())
            {
                drag_to(pos, room_rect, state);
            }
        }
        // End drag when button released
        if response.drag_stopped() || !response.dragged_by(egui::PointerButton::Primary) {
            state.interaction.pointer_up();
        }
        return;
    }

    // ── Drag start on a footprint ───────────────────────────
    if response.drag_started_by(egui::PointerButton::Primary) {
        if let Some(pos) = response
            .interact_pointer_pos()
            .or_else(|| response.hover_pos())
        {
            if let Some(id) = hit_test(pos, room_rect, state) {
                if let Some(anchor) = state.layout.get(&id).map(|p| p.pos) {
                    state.layout.begin_drag();
                    state.interaction.pointer_down_on(id, anchor);
                    drag_to(pos, room_rect, state);
                }
            }
        }
        return;
    }

    // ── Plain click: select, or clear on empty floor ────────
    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            match hit_test(pos, room_rect, state) {
                Some(id) => state.interaction.select(id),
                None => state.interaction.deselect(),
            }
        }
    }
}

/// Move the dragged item under the pointer, clamped so its footprint stays
/// inside the walls.
fn drag_to(pointer: Pos2, room_rect: Rect, state: &mut AppState) {
    let Some(id) = state.interaction.dragging().cloned() else {
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
    let world = screen_to_world(room_rect, &state.room, pointer);
    let clamped = plan::clamp_world_to_room(&state.room, world, half);
    state
        .layout
        .drag_to(&id, plan::world_to_plan(&state.room, clamped));
}

/// Topmost footprint under the pointer. Later placements draw on top, so
/// the list is walked back to front.
fn hit_test(pointer: Pos2, room_rect: Rect, state: &AppState) -> Option<String> {
    let world = screen_to_world(room_rect, &state.room, pointer);
    let p = Vec2::new(world.x, world.z);
    state
        .layout
        .placements()
        .iter()
        .rev()
        .find(|pl| pl.footprint(&state.room).contains(p))
        .map(|pl| pl.id.clone())
}

/// Accept a catalog entry dropped from the side panel.
fn handle_drop(ui: &Ui, response: &egui::Response, room_rect: Rect, state: &mut AppState) {
    // Ghost outline while the entry hovers over the plan
    if let Some(payload) = response.dnd_hover_payload::<DragItem>() {
        if let (Some(pos), Some(item)) = (response.hover_pos(), state.catalog.resolve(&payload.0))
        {
            let dims = item.dims_m();
            let ppm = room_rect.width() / state.room.width as f32;
            let size = vec2(dims[0] * ppm, dims[2] * ppm);
            ui.painter().rect_stroke(
                Rect::from_center_size(pos, size),
                2.0,
                Stroke::new(1.5, Color32::from_gray(140)),
                egui::StrokeKind::Middle,
            );
        }
    }

    if let Some(payload) = response.dnd_release_payload::<DragItem>() {
        if let Some(item) = state.catalog.resolve(&payload.0) {
            let at = response
                .hover_pos()
                .map(|p| plan::screen_to_plan(room_rect, p))
                .unwrap_or(PlanPos::CENTER);
            let id = state.layout.place(item, at);
            state.interaction.select(id);
        }
    }
}

// ── Drawing ───────────────────────────────────────────────────

fn draw_room(painter: &egui::Painter, room_rect: Rect, state: &AppState) {
    let room = &state.room;

    painter.rect_filled(room_rect, 0.0, Color32::from_rgb(44, 44, 48));

    if state.settings.plan.show_grid {
        let grid = Stroke::new(1.0, Color32::from_rgb(56, 56, 61));
        let mut m = 1.0_f64;
        while m < room.width {
            let x = room_rect.left() + (m / room.width) as f32 * room_rect.width();
            painter.line_segment(
                [pos2(x, room_rect.top()), pos2(x, room_rect.bottom())],
                grid,
            );
            m += 1.0;
        }
        let mut m = 1.0_f64;
        while m < room.length {
            let y = room_rect.top() + (m / room.length) as f32 * room_rect.height();
            painter.line_segment(
                [pos2(room_rect.left(), y), pos2(room_rect.right(), y)],
                grid,
            );
            m += 1.0;
        }
    }

    // Walls
    painter.rect_stroke(
        room_rect,
        0.0,
        Stroke::new(2.0, Color32::from_rgb(120, 120, 128)),
        egui::StrokeKind::Outside,
    );

    if state.settings.plan.show_labels {
        painter.text(
            pos2(room_rect.center().x, room_rect.top() - 6.0),
            egui::Align2::CENTER_BOTTOM,
            format!("{:.1} m × {:.1} m", room.width, room.length),
            egui::FontId::proportional(12.0),
            Color32::from_rgb(160, 160, 170),
        );
    }
}

fn draw_placements(ui: &Ui, painter: &egui::Painter, room_rect: Rect, state: &AppState) {
    let overlapping = if state.settings.plan.warn_overlaps {
        state.overlapping_placements()
    } else {
        HashSet::new()
    };
    let selected = state.interaction.selected().cloned();
    let sel = state.settings.viewport.selection_color;
    let selection_color = Color32::from_rgb(sel[0], sel[1], sel[2]);

    for placement in state.layout.placements() {
        let fp = placement.footprint(&state.room);
        let corners = fp.corners();
        let points: Vec<Pos2> = corners
            .iter()
            .map(|c| world_to_screen(room_rect, &state.room, *c))
            .collect();

        let base = placement.item.color.unwrap_or([0.55, 0.55, 0.60]);
        let fill = Color32::from_rgba_unmultiplied(
            (base[0] * 255.0) as u8,
            (base[1] * 255.0) as u8,
            (base[2] * 255.0) as u8,
            210,
        );

        let is_selected = selected.as_deref() == Some(placement.id.as_str());
        let stroke = if is_selected {
            Stroke::new(2.5, selection_color)
        } else if overlapping.contains(&placement.id) {
            Stroke::new(2.0, Color32::from_rgb(230, 140, 60))
        } else {
            Stroke::new(1.0, Color32::from_rgb(28, 28, 32))
        };

        painter.add(Shape::convex_polygon(points.clone(), fill, stroke));

        // Thumbnail rotated with the footprint
        if let Some(ref thumb) = placement.item.thumbnail {
            let ppm = room_rect.width() / state.room.width as f32;
            let size = vec2(fp.half.x * 2.0 * ppm, fp.half.y * 2.0 * ppm);
            let center = world_to_screen(room_rect, &state.room, fp.center);
            egui::Image::new(format!("file://{thumb}"))
                .rotate(fp.rotation_deg.to_radians(), egui::Vec2::splat(0.5))
                .paint_at(ui, Rect::from_center_size(center, size));
        }

        // Facing marker from the center to the front edge
        let front = (corners[0] + corners[3]) * 0.5;
        painter.line_segment(
            [
                world_to_screen(room_rect, &state.room, fp.center),
                world_to_screen(room_rect, &state.room, front),
            ],
            Stroke::new(1.5, Color32::from_rgb(235, 235, 240)),
        );

        // Name under the footprint
        let y_max = points.iter().fold(f32::MIN, |m, p| m.max(p.y));
        painter.text(
            pos2(
                world_to_screen(room_rect, &state.room, fp.center).x,
                y_max + 2.0,
            ),
            egui::Align2::CENTER_TOP,
            &placement.item.name,
            egui::FontId::proportional(10.0),
            Color32::from_rgb(200, 200, 205),
        );
    }
}
