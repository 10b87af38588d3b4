//! The two coordinate spaces of the planner and the pure conversions between
//! them.
//!
//! Plan space: percent of room width/length, origin at the plan's top-left
//! corner, legal band [5, 95] on both axes. This is the authoritative space
//! placements are stored in.
//!
//! World space: meters, room centered on the origin, floor at y = 0, +X along
//! room width, +Z along room length. The 3D viewport works here and converts
//! back through `world_to_plan` before writing positions.

use egui::{pos2, Pos2, Rect};
use glam::Vec3;
use shared::RoomSpec;

pub mod overlap;

pub const PLAN_MIN: f32 = 5.0;
pub const PLAN_MAX: f32 = 95.0;

/// A position in plan space (percent of room extents).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanPos {
    pub x: f32,
    pub y: f32,
}

impl PlanPos {
    pub const CENTER: PlanPos = PlanPos { x: 50.0, y: 50.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Saturate into the legal band. Non-finite input recenters the axis so a
    /// poisoned pointer coordinate can never violate the position invariant.
    pub fn clamped(self) -> Self {
        let clamp = |v: f32| {
            if v.is_finite() {
                v.clamp(PLAN_MIN, PLAN_MAX)
            } else {
                50.0
            }
        };
        Self { x: clamp(self.x), y: clamp(self.y) }
    }
}

/// Plan percent to world meters, on the floor plane.
pub fn plan_to_world(room: &RoomSpec, pos: PlanPos) -> Vec3 {
    let x = (pos.x / 100.0 - 0.5) * room.width as f32;
    let z = (pos.y / 100.0 - 0.5) * room.length as f32;
    Vec3::new(x, 0.0, z)
}

/// World meters back to plan percent, clamped into the legal band.
pub fn world_to_plan(room: &RoomSpec, point: Vec3) -> PlanPos {
    PlanPos {
        x: (point.x / room.width as f32 + 0.5) * 100.0,
        y: (point.z / room.length as f32 + 0.5) * 100.0,
    }
    .clamped()
}

/// Pointer pixels to plan percent: `(pointer - rect.min) / rect.size * 100`,
/// clamped.
pub fn screen_to_plan(room_rect: Rect, pointer: Pos2) -> PlanPos {
    PlanPos {
        x: (pointer.x - room_rect.left()) / room_rect.width() * 100.0,
        y: (pointer.y - room_rect.top()) / room_rect.height() * 100.0,
    }
    .clamped()
}

pub fn plan_to_screen(room_rect: Rect, pos: PlanPos) -> Pos2 {
    pos2(
        room_rect.left() + pos.x / 100.0 * room_rect.width(),
        room_rect.top() + pos.y / 100.0 * room_rect.height(),
    )
}

/// Axis-aligned half extents (x, z) in meters of a scaled, rotated footprint.
/// Used by the 3D drag clamp so no corner of the item crosses a wall.
pub fn footprint_half_extents(dims_m: [f32; 3], scale: f32, rotation_deg: f32) -> (f32, f32) {
    let hw = dims_m[0] * scale * 0.5;
    let hd = dims_m[2] * scale * 0.5;
    let rad = rotation_deg.to_radians();
    let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
    (hw * cos + hd * sin, hw * sin + hd * cos)
}

/// Clamp a world-space floor point so the given half extents stay inside the
/// walls. A footprint wider than the room centers on that axis.
pub fn clamp_world_to_room(room: &RoomSpec, point: Vec3, half_extents: (f32, f32)) -> Vec3 {
    let clamp_axis = |v: f32, room_half: f32, item_half: f32| {
        let limit = room_half - item_half;
        if limit <= 0.0 {
            0.0
        } else {
            v.clamp(-limit, limit)
        }
    };
    Vec3::new(
        clamp_axis(point.x, room.width as f32 * 0.5, half_extents.0),
        0.0,
        clamp_axis(point.z, room.length as f32 * 0.5, half_extents.1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> RoomSpec {
        RoomSpec::new(6.0, 4.0).unwrap()
    }

    #[test]
    fn test_center_maps_to_origin() {
        let p = plan_to_world(&room(), PlanPos::CENTER);
        assert!(p.length() < 1e-6);
    }

    #[test]
    fn test_plan_world_round_trip() {
        let room = room();
        for pos in [
            PlanPos::new(5.0, 5.0),
            PlanPos::new(95.0, 95.0),
            PlanPos::new(33.0, 71.5),
        ] {
            let back = world_to_plan(&room, plan_to_world(&room, pos));
            assert!((back.x - pos.x).abs() < 1e-4);
            assert!((back.y - pos.y).abs() < 1e-4);
        }
    }

    #[test]
    fn test_plan_axes_follow_room_extents() {
        let room = room();
        let p = plan_to_world(&room, PlanPos::new(95.0, 5.0));
        // 95% of 6 m width is 0.45 * 6 = 2.7 m right of center
        assert!((p.x - 2.7).abs() < 1e-5);
        assert!((p.z - (-1.8)).abs() < 1e-5);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn test_screen_to_plan_formula() {
        let rect = Rect::from_min_size(pos2(100.0, 50.0), egui::vec2(400.0, 300.0));
        let p = screen_to_plan(rect, pos2(300.0, 125.0));
        assert!((p.x - 50.0).abs() < 1e-4);
        assert!((p.y - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_screen_to_plan_clamps_to_band() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), egui::vec2(100.0, 100.0));
        let outside = screen_to_plan(rect, pos2(250.0, -40.0));
        assert_eq!(outside.x, PLAN_MAX);
        assert_eq!(outside.y, PLAN_MIN);
    }

    #[test]
    fn test_plan_to_screen_inverse() {
        let rect = Rect::from_min_size(pos2(10.0, 20.0), egui::vec2(200.0, 160.0));
        let pos = PlanPos::new(25.0, 75.0);
        let px = plan_to_screen(rect, pos);
        let back = screen_to_plan(rect, px);
        assert!((back.x - pos.x).abs() < 1e-4);
        assert!((back.y - pos.y).abs() < 1e-4);
    }

    #[test]
    fn test_clamped_handles_non_finite() {
        let p = PlanPos::new(f32::NAN, f32::INFINITY).clamped();
        assert_eq!(p.x, 50.0);
        assert_eq!(p.y, 50.0);
    }

    #[test]
    fn test_footprint_half_extents_axis_aligned() {
        let (hx, hz) = footprint_half_extents([2.0, 1.0, 1.0], 1.0, 0.0);
        assert!((hx - 1.0).abs() < 1e-5);
        assert!((hz - 0.5).abs() < 1e-5);
        // A quarter turn swaps the extents
        let (hx, hz) = footprint_half_extents([2.0, 1.0, 1.0], 1.0, 90.0);
        assert!((hx - 0.5).abs() < 1e-4);
        assert!((hz - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_footprint_half_extents_rotated_and_scaled() {
        let (hx, hz) = footprint_half_extents([2.0, 1.0, 2.0], 2.0, 45.0);
        let expected = 2.0 * std::f32::consts::FRAC_1_SQRT_2 * 2.0;
        assert!((hx - expected).abs() < 1e-4);
        assert!((hz - expected).abs() < 1e-4);
    }

    #[test]
    fn test_clamp_world_keeps_footprint_inside() {
        let room = room();
        let clamped = clamp_world_to_room(
            &room,
            Vec3::new(100.0, 0.0, -100.0),
            (0.5, 0.25),
        );
        assert!((clamped.x - 2.5).abs() < 1e-5);
        assert!((clamped.z - (-1.75)).abs() < 1e-5);
    }

    #[test]
    fn test_clamp_world_oversized_footprint_centers() {
        let room = room();
        let clamped = clamp_world_to_room(&room, Vec3::new(5.0, 0.0, 5.0), (10.0, 1.0));
        assert_eq!(clamped.x, 0.0);
        assert!((clamped.z - 1.0).abs() < 1e-5);
    }
}
