//! Procedural furniture meshes.
//!
//! Each category maps onto a fixed template assembled from the primitives in
//! [`crate::viewport::mesh`]. Output is placement-local: footprint centered
//! on the origin, base resting on y = 0, dimensions in meters. Generation
//! never fails; items without usable dimensions become a one meter cube.

use glam::Vec3;

use shared::{CatalogItem, Category};

use crate::viewport::mesh::{self, MeshData};

/// Material used when the catalog record carries no color hint.
pub const DEFAULT_COLOR: [f32; 3] = [0.82, 0.71, 0.55];

const DECOR_SEGMENTS: u32 = 24;

/// Build the mesh for one catalog item from its category template.
pub fn generate(item: &CatalogItem) -> MeshData {
    let [w, h, d] = item.dims_m();
    let color = item.color.unwrap_or(DEFAULT_COLOR);
    match item.category {
        Category::Sofa => sofa(w, h, d, color),
        Category::Bed => bed(w, h, d, color),
        Category::Table => table(w, h, d, color),
        Category::Decor => decor(w, h, d, color),
        Category::Storage | Category::Lighting | Category::Other => slab(w, h, d, color),
    }
}

// ── Category templates ──────────────────────────────────────────

/// Full-footprint base slab with a seat slab stacked on top.
fn sofa(w: f32, h: f32, d: f32, color: [f32; 3]) -> MeshData {
    let base_h = h * 0.7;
    let seat_h = h * 0.3;
    let mut m = box_on_floor(w, base_h, d, 0.0, color);
    m.append(&box_on_floor(w, seat_h, d, base_h, color));
    m
}

/// Thin base slab plus a headboard along the rear footprint edge. The
/// headboard rises to the full item height.
fn bed(w: f32, h: f32, d: f32, color: [f32; 3]) -> MeshData {
    let base_h = h * 0.2;
    let head_h = h * 0.8;
    let head_d = d * 0.1;
    let mut m = box_on_floor(w, base_h, d, 0.0, color);
    m.append(
        &box_on_floor(w, head_h, head_d, base_h, color)
            .translated(Vec3::new(0.0, 0.0, -(d - head_d) * 0.5)),
    );
    m
}

/// Inset body box under a slightly wider surface slab.
fn table(w: f32, h: f32, d: f32, color: [f32; 3]) -> MeshData {
    let body_h = h * 0.8;
    let top_h = h * 0.2;
    let mut m = box_on_floor(w * 0.85, body_h, d * 0.85, 0.0, color);
    m.append(&box_on_floor(w, top_h, d, body_h, color));
    m
}

/// Cylinder whose diameter is the lesser footprint side.
fn decor(w: f32, h: f32, d: f32, color: [f32; 3]) -> MeshData {
    let radius = w.min(d) * 0.5;
    mesh::cylinder(radius, h, DECOR_SEGMENTS, color).translated(Vec3::new(0.0, h * 0.5, 0.0))
}

/// Plain box over the whole footprint.
fn slab(w: f32, h: f32, d: f32, color: [f32; 3]) -> MeshData {
    box_on_floor(w, h, d, 0.0, color)
}

/// Axis-aligned box resting on the plane y = `floor`.
fn box_on_floor(w: f32, h: f32, d: f32, floor: f32, color: [f32; 3]) -> MeshData {
    mesh::cube(w, h, d, color).translated(Vec3::new(0.0, floor + h * 0.5, 0.0))
}
