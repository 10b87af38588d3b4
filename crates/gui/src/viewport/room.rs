//! Room shell meshes: floor, walls and ceiling with inward-facing normals.
//!
//! Vertices are baked white; the renderer multiplies in the active swatch
//! color per draw, so changing a swatch never re-uploads geometry.

use glam::Vec3;
use shared::RoomSpec;

use super::mesh::{self, MeshData};

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

/// Floor finishes offered in the toolbar
pub const FLOOR_SWATCHES: [(&str, [f32; 3]); 4] = [
    ("Oak", [0.72, 0.58, 0.42]),
    ("Walnut", [0.45, 0.33, 0.24]),
    ("Stone", [0.62, 0.62, 0.64]),
    ("Concrete", [0.48, 0.48, 0.50]),
];

/// Wall paints offered in the toolbar
pub const WALL_SWATCHES: [(&str, [f32; 3]); 4] = [
    ("White", [0.92, 0.92, 0.90]),
    ("Cream", [0.93, 0.89, 0.78]),
    ("Sage", [0.74, 0.80, 0.72]),
    ("Slate", [0.52, 0.58, 0.64]),
];

pub fn floor_color(swatch: usize) -> [f32; 3] {
    FLOOR_SWATCHES[swatch % FLOOR_SWATCHES.len()].1
}

pub fn wall_color(swatch: usize) -> [f32; 3] {
    WALL_SWATCHES[swatch % WALL_SWATCHES.len()].1
}

/// Floor quad at y = 0, normal up.
pub fn floor(room: &RoomSpec) -> MeshData {
    let hw = room.width as f32 * 0.5;
    let hl = room.length as f32 * 0.5;
    mesh::quad(
        [
            Vec3::new(-hw, 0.0, -hl),
            Vec3::new(-hw, 0.0, hl),
            Vec3::new(hw, 0.0, hl),
            Vec3::new(hw, 0.0, -hl),
        ],
        Vec3::Y,
        WHITE,
    )
}

/// Four wall quads up to the wall height, normals pointing into the room.
pub fn walls(room: &RoomSpec) -> MeshData {
    let hw = room.width as f32 * 0.5;
    let hl = room.length as f32 * 0.5;
    let h = room.wall_height as f32;

    // Far wall (-z), faces +z
    let mut m = mesh::quad(
        [
            Vec3::new(-hw, 0.0, -hl),
            Vec3::new(hw, 0.0, -hl),
            Vec3::new(hw, h, -hl),
            Vec3::new(-hw, h, -hl),
        ],
        Vec3::Z,
        WHITE,
    );
    // Near wall (+z), faces -z
    m.append(&mesh::quad(
        [
            Vec3::new(hw, 0.0, hl),
            Vec3::new(-hw, 0.0, hl),
            Vec3::new(-hw, h, hl),
            Vec3::new(hw, h, hl),
        ],
        Vec3::NEG_Z,
        WHITE,
    ));
    // Left wall (-x), faces +x
    m.append(&mesh::quad(
        [
            Vec3::new(-hw, 0.0, hl),
            Vec3::new(-hw, 0.0, -hl),
            Vec3::new(-hw, h, -hl),
            Vec3::new(-hw, h, hl),
        ],
        Vec3::X,
        WHITE,
    ));
    // Right wall (+x), faces -x
    m.append(&mesh::quad(
        [
            Vec3::new(hw, 0.0, -hl),
            Vec3::new(hw, 0.0, hl),
            Vec3::new(hw, h, hl),
            Vec3::new(hw, h, -hl),
        ],
        Vec3::NEG_X,
        WHITE,
    ));
    m
}

/// Ceiling quad at the wall height, normal down into the room.
pub fn ceiling(room: &RoomSpec) -> MeshData {
    let hw = room.width as f32 * 0.5;
    let hl = room.length as f32 * 0.5;
    let h = room.wall_height as f32;
    mesh::quad(
        [
            Vec3::new(-hw, h, -hl),
            Vec3::new(hw, h, -hl),
            Vec3::new(hw, h, hl),
            Vec3::new(-hw, h, hl),
        ],
        Vec3::NEG_Y,
        WHITE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::picking::Aabb;

    #[test]
    fn test_floor_spans_the_room_at_ground_level() {
        let room = RoomSpec::new(6.0, 4.0).unwrap();
        let bb = Aabb::from_mesh(&floor(&room));
        assert!((bb.min.x + 3.0).abs() < 1e-5);
        assert!((bb.max.x - 3.0).abs() < 1e-5);
        assert!((bb.min.z + 2.0).abs() < 1e-5);
        assert!((bb.max.z - 2.0).abs() < 1e-5);
        assert_eq!(bb.min.y, 0.0);
        assert_eq!(bb.max.y, 0.0);
    }

    #[test]
    fn test_wall_normals_face_inward() {
        let room = RoomSpec::default();
        let m = walls(&room);
        assert_eq!(m.triangle_count(), 8);
        for v in m.vertices.chunks_exact(9) {
            let pos = Vec3::new(v[0], v[1], v[2]);
            let normal = Vec3::new(v[3], v[4], v[5]);
            let toward_center = Vec3::new(-pos.x, 0.0, -pos.z);
            assert!(
                normal.dot(toward_center) > 0.0,
                "outward normal {normal:?} at {pos:?}"
            );
        }
    }

    #[test]
    fn test_ceiling_sits_at_wall_height_facing_down() {
        let room = RoomSpec::default();
        let m = ceiling(&room);
        let bb = Aabb::from_mesh(&m);
        assert!((bb.min.y - room.wall_height as f32).abs() < 1e-5);
        assert_eq!(bb.min.y, bb.max.y);
        for v in m.vertices.chunks_exact(9) {
            assert_eq!(Vec3::new(v[3], v[4], v[5]), Vec3::NEG_Y);
        }
    }

    #[test]
    fn test_swatch_lookup_wraps() {
        assert_eq!(floor_color(0), FLOOR_SWATCHES[0].1);
        assert_eq!(floor_color(FLOOR_SWATCHES.len()), FLOOR_SWATCHES[0].1);
        assert_eq!(wall_color(2), WALL_SWATCHES[2].1);
    }
}
